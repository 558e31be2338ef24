//! Feeding schedule editor.
//!
//! SYSTEM CONTEXT
//! ==============
//! Lists pending and past schedules for the next 30 days, grouped under each
//! active module. One row at a time can become an inline add/edit form.
//!
//! DESIGN
//! ======
//! The table re-renders from a memo of its structure (rows, error, which row
//! is being edited) rather than the whole editor state. Typing into a form
//! only touches the draft, so inputs keep focus between keystrokes.
//!
//! While a form is open the 10 s poll skips its fetch entirely; cancelling
//! or saving returns to viewing and refreshes immediately.

use leptos::prelude::*;

use crate::components::status_badge::StatusBadge;
use crate::components::toast_stack::notify;
use crate::net::api;
use crate::net::types::Schedule;
use crate::state::schedule::{EditTarget, ModuleBlock, RECURRING_DAYS, SaveRequest, ScheduleEditor, schedule_window};
use crate::state::toast::{ToastKind, ToastState};
use crate::util::clock;
use crate::util::format::{feed_date_label, format_feed_time, format_grams};
use crate::util::poll::{SCHEDULES_INTERVAL, spawn_once, spawn_poll};

const COLUMNS: &str = "6";

async fn refresh(editor: RwSignal<ScheduleEditor>) {
    if editor.with_untracked(ScheduleEditor::is_editing) {
        return;
    }
    let (start, end) = schedule_window(clock::today());
    let result = match api::fetch_modules().await {
        Ok(modules) => api::fetch_schedules(start, end).await.map(|schedules| (modules, schedules)),
        Err(e) => Err(e),
    };
    #[cfg(feature = "hydrate")]
    if let Err(e) = &result {
        log::error!("Error loading data: {e}");
    }
    editor.update(|e| {
        e.apply_fetch(result);
    });
}

async fn save(
    editor: RwSignal<ScheduleEditor>,
    toasts: RwSignal<ToastState>,
    target: EditTarget,
    request: SaveRequest,
) {
    let outcome = match &request {
        SaveRequest::Create(body) => api::create_schedule(body)
            .await
            .map(|()| "✓ Schedule created successfully".to_owned())
            .map_err(|e| format!("Error adding schedule: {e}")),
        SaveRequest::Recurring(body) => {
            notify(toasts, ToastKind::Info, format!("Creating {RECURRING_DAYS} recurring schedules..."));
            api::create_recurring_schedules(body)
                .await
                .map(|r| format!("✓ Created {} schedules for the next {RECURRING_DAYS} days", r.created_count))
                .map_err(|e| format!("Error adding recurring schedule: {e}"))
        }
        SaveRequest::Update { schedule_id, body } => api::update_schedule(*schedule_id, body)
            .await
            .map(|()| "Schedule updated successfully".to_owned())
            .map_err(|e| format!("Error updating schedule: {e}")),
    };
    match outcome {
        Ok(message) => {
            editor.update(|e| {
                e.finish_save(&target);
            });
            notify(toasts, ToastKind::Success, message);
            refresh(editor).await;
        }
        Err(message) => {
            editor.update(|e| e.fail_save(&target));
            notify(toasts, ToastKind::Error, message);
        }
    }
}

async fn delete(editor: RwSignal<ScheduleEditor>, toasts: RwSignal<ToastState>, schedule_id: i64) {
    match api::delete_schedule(schedule_id).await {
        Ok(()) => {
            editor.update(|e| e.remove_schedule(schedule_id));
            notify(toasts, ToastKind::Success, "Schedule deleted successfully");
            refresh(editor).await;
        }
        Err(e) => notify(toasts, ToastKind::Error, format!("Error deleting schedule: {e}")),
    }
}

/// Row-level actions handed down to table rows.
#[derive(Clone, Copy)]
struct RowActions {
    add: Callback<String>,
    edit: Callback<Schedule>,
    delete: Callback<i64>,
    save: Callback<()>,
    cancel: Callback<()>,
}

#[component]
pub fn SchedulesPage() -> impl IntoView {
    let editor = expect_context::<RwSignal<ScheduleEditor>>();
    let toasts = expect_context::<RwSignal<ToastState>>();

    spawn_poll(SCHEDULES_INTERVAL, move || refresh(editor));

    let actions = RowActions {
        add: Callback::new(move |module_id: String| {
            editor.update(|e| e.begin_add(&module_id, clock::today()));
        }),
        edit: Callback::new(move |schedule: Schedule| editor.update(|e| e.begin_edit(&schedule))),
        delete: Callback::new(move |schedule_id: i64| {
            if clock::confirm("Are you sure you want to delete this schedule?") {
                spawn_once(delete(editor, toasts, schedule_id));
            }
        }),
        save: Callback::new(move |()| {
            if editor.with_untracked(|e| e.saving) {
                return;
            }
            let prepared = editor.with_untracked(|e| e.target().cloned().zip(e.prepare_save()));
            match prepared {
                None => {}
                Some((_, Err(invalid))) => notify(toasts, ToastKind::Error, invalid.message()),
                Some((target, Ok(request))) => {
                    editor.update(|e| e.saving = true);
                    spawn_once(save(editor, toasts, target, request));
                }
            }
        }),
        cancel: Callback::new(move |()| {
            editor.update(ScheduleEditor::cancel);
            spawn_once(refresh(editor));
        }),
    };

    let structure = Memo::new(move |_| {
        editor.with(|e| (e.blocks(), e.error.clone(), e.loaded, e.target().cloned()))
    });

    view! {
        <section class="view view--schedules">
            <h1 class="view__title">"Feeding Schedules"</h1>
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Module"</th>
                        <th>"Date"</th>
                        <th>"Time"</th>
                        <th>"Amount"</th>
                        <th>"Status"</th>
                        <th>"Actions"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let (blocks, error, loaded, target) = structure.get();
                        if let Some(err) = error {
                            return message_row(format!("Error loading data: {err}"));
                        }
                        if !loaded {
                            return message_row("Loading...".to_owned());
                        }
                        if blocks.is_empty() {
                            return message_row("No active modules found. Please add modules first.".to_owned());
                        }
                        let editing = target.is_some();
                        let new_row = match &target {
                            Some(EditTarget::New { module_id }) => {
                                Some(view! { <NewScheduleRow module_id=module_id.clone() actions=actions/> })
                            }
                            _ => None,
                        };
                        let editing_id = match &target {
                            Some(EditTarget::Existing { schedule_id, .. }) => Some(*schedule_id),
                            _ => None,
                        };
                        let today = clock::today();
                        let rows = blocks
                            .into_iter()
                            .map(|block| module_rows(block, editing, editing_id, today, actions))
                            .collect_view();
                        view! {
                            {new_row}
                            {rows}
                        }
                            .into_any()
                    }}
                </tbody>
            </table>
        </section>
    }
}

fn message_row(text: String) -> AnyView {
    view! { <tr><td colspan=COLUMNS>{text}</td></tr> }.into_any()
}

fn module_rows(
    block: ModuleBlock,
    editing: bool,
    editing_id: Option<i64>,
    today: chrono::NaiveDate,
    actions: RowActions,
) -> AnyView {
    let ModuleBlock { module_id, schedules } = block;
    if schedules.is_empty() {
        let add_id = module_id.clone();
        return view! {
            <tr class="schedule-row schedule-row--empty">
                <td><strong>{module_id}</strong></td>
                <td><em>"No schedules"</em></td>
                <td><em>"-"</em></td>
                <td><em>"-"</em></td>
                <td><StatusBadge status="pending"/></td>
                <td>
                    <button
                        class="btn btn--add"
                        disabled=editing
                        on:click=move |_| actions.add.run(add_id.clone())
                    >
                        "+ Add Schedule"
                    </button>
                </td>
            </tr>
        }
        .into_any();
    }
    schedules
        .into_iter()
        .enumerate()
        .map(|(index, schedule)| {
            if editing_id == Some(schedule.schedule_id) {
                view! { <EditScheduleRow schedule=schedule actions=actions/> }.into_any()
            } else {
                schedule_row(&module_id, index == 0, schedule, editing, today, actions).into_any()
            }
        })
        .collect_view()
        .into_any()
}

fn schedule_row(
    module_id: &str,
    first: bool,
    schedule: Schedule,
    editing: bool,
    today: chrono::NaiveDate,
    actions: RowActions,
) -> impl IntoView {
    let module_cell = if first {
        view! { <strong>{module_id.to_owned()}</strong> }.into_any()
    } else {
        view! { <span class="schedule-row__continuation">"↳"</span> }.into_any()
    };
    let add_module = module_id.to_owned();
    let schedule_id = schedule.schedule_id;
    let edit_target = schedule.clone();
    view! {
        <tr class="schedule-row">
            <td>{module_cell}</td>
            <td>
                {feed_date_label(schedule.feed_date, today)}
                <br/>
                <small class="schedule-row__raw-date">{schedule.feed_date.format("%Y-%m-%d").to_string()}</small>
            </td>
            <td>{format_feed_time(&schedule.feed_time)}</td>
            <td>{format_grams(schedule.amount)}</td>
            <td><StatusBadge status=schedule.status.as_str()/></td>
            <td>
                <button class="btn btn--edit" disabled=editing on:click=move |_| actions.edit.run(edit_target.clone())>
                    "Edit"
                </button>
                <button class="btn btn--delete" disabled=editing on:click=move |_| actions.delete.run(schedule_id)>
                    "Delete"
                </button>
                {first
                    .then(|| {
                        view! {
                            <button
                                class="btn btn--add"
                                disabled=editing
                                on:click=move |_| actions.add.run(add_module.clone())
                            >
                                "+ Add"
                            </button>
                        }
                    })}
            </td>
        </tr>
    }
}

/// Current draft value, read once when a form row mounts.
fn draft_value(editor: RwSignal<ScheduleEditor>, pick: fn(&crate::state::schedule::ScheduleDraft) -> String) -> String {
    editor.with_untracked(|e| e.draft().map(pick).unwrap_or_default())
}

#[component]
fn NewScheduleRow(module_id: String, actions: RowActions) -> impl IntoView {
    let editor = expect_context::<RwSignal<ScheduleEditor>>();
    let date = draft_value(editor, |d| d.feed_date.clone());
    let time = draft_value(editor, |d| d.feed_time.clone());
    let amount = draft_value(editor, |d| d.amount.clone());

    view! {
        <tr class="schedule-row schedule-row--form">
            <td><strong>{module_id}</strong></td>
            <td colspan="2">
                <div class="schedule-form">
                    <label class="schedule-form__title">"Create Schedule"</label>
                    <label class="schedule-form__field">
                        "Date:"
                        <input
                            type="date"
                            class="input-date"
                            prop:value=date
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                editor.update(|e| e.edit_draft(|d| d.feed_date = value));
                            }
                        />
                    </label>
                    <label class="schedule-form__field">
                        "Time:"
                        <input
                            type="time"
                            class="input-time"
                            prop:value=time
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                editor.update(|e| e.edit_draft(|d| d.feed_time = value));
                            }
                        />
                    </label>
                    <label class="schedule-form__repeat">
                        <input
                            type="checkbox"
                            on:change=move |ev| {
                                let checked = event_target_checked(&ev);
                                editor.update(|e| e.edit_draft(|d| d.repeat_daily = checked));
                            }
                        />
                        <span>
                            <strong>{format!("Repeat Daily (next {RECURRING_DAYS} days)")}</strong>
                            <br/>
                            <small>{format!("Creates same schedule for the next {RECURRING_DAYS} days")}</small>
                        </span>
                    </label>
                </div>
            </td>
            <td>
                <AmountInput editor=editor initial=amount/>
            </td>
            <td><StatusBadge status="pending"/></td>
            <td>
                <button class="btn btn--save" disabled=move || editor.with(|e| e.saving) on:click=move |_| actions.save.run(())>
                    "Save Schedule"
                </button>
                <button class="btn btn--cancel" on:click=move |_| actions.cancel.run(())>"Cancel"</button>
            </td>
        </tr>
    }
}

#[component]
fn EditScheduleRow(schedule: Schedule, actions: RowActions) -> impl IntoView {
    let editor = expect_context::<RwSignal<ScheduleEditor>>();
    let date = draft_value(editor, |d| d.feed_date.clone());
    let time = draft_value(editor, |d| d.feed_time.clone());
    let amount = draft_value(editor, |d| d.amount.clone());

    view! {
        <tr class="schedule-row schedule-row--form">
            <td><strong>{schedule.module_id}</strong></td>
            <td>
                <input
                    type="date"
                    class="input-date"
                    prop:value=date
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        editor.update(|e| e.edit_draft(|d| d.feed_date = value));
                    }
                />
            </td>
            <td>
                <input
                    type="time"
                    class="input-time"
                    prop:value=time
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        editor.update(|e| e.edit_draft(|d| d.feed_time = value));
                    }
                />
            </td>
            <td>
                <AmountInput editor=editor initial=amount/>
            </td>
            <td><StatusBadge status=schedule.status.as_str()/></td>
            <td>
                <button class="btn btn--save" disabled=move || editor.with(|e| e.saving) on:click=move |_| actions.save.run(())>
                    "Save"
                </button>
                <button class="btn btn--cancel" on:click=move |_| actions.cancel.run(())>"Cancel"</button>
            </td>
        </tr>
    }
}

#[component]
fn AmountInput(editor: RwSignal<ScheduleEditor>, initial: String) -> impl IntoView {
    view! {
        <input
            type="number"
            class="input-amount"
            step="0.01"
            min="0"
            placeholder="grams"
            prop:value=initial
            on:input=move |ev| {
                let value = event_target_value(&ev);
                editor.update(|e| e.edit_draft(|d| d.amount = value));
            }
        />
    }
}
