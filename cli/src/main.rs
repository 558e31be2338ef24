
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde_json::{Map, Value, json};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("server returned {status}: {message}")]
    ServerError { status: u16, message: String },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "feeder-cli", about = "SmartFeeder API and device CLI")]
struct Cli {
    #[arg(long, env = "FEEDER_BASE_URL", default_value = "http://127.0.0.1:8080")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Hit the device health endpoint.
    Ping,
    Modules(ModulesCommand),
    Cameras(CamerasCommand),
    Schedules(SchedulesCommand),
    History(HistoryCommand),
    Snapshots(SnapshotsCommand),
    Analytics(AnalyticsCommand),
    /// Act as a feeder module or camera.
    Device(DeviceCommand),
}

// =============================================================================
// MODULES / CAMERAS
// =============================================================================

#[derive(Args, Debug)]
struct ModulesCommand {
    #[command(subcommand)]
    command: ModulesSubcommand,
}

#[derive(Subcommand, Debug)]
enum ModulesSubcommand {
    List,
    Add {
        module_id: String,
        #[arg(long)]
        cam_id: String,
        #[arg(long, default_value = "active")]
        status: String,
        #[arg(long)]
        weight: Option<f64>,
    },
    Update {
        module_id: String,
        #[arg(long)]
        cam_id: String,
        #[arg(long, default_value = "active")]
        status: String,
        #[arg(long)]
        weight: Option<f64>,
    },
    Delete {
        module_id: String,
    },
}

#[derive(Args, Debug)]
struct CamerasCommand {
    #[command(subcommand)]
    command: CamerasSubcommand,
}

#[derive(Subcommand, Debug)]
enum CamerasSubcommand {
    List,
    Add {
        cam_id: String,
        #[arg(long, default_value = "active")]
        status: String,
    },
    Delete {
        cam_id: String,
    },
}

// =============================================================================
// SCHEDULES / HISTORY
// =============================================================================

#[derive(Args, Debug)]
struct SchedulesCommand {
    #[command(subcommand)]
    command: SchedulesSubcommand,
}

#[derive(Args, Debug)]
struct ScheduleFields {
    #[arg(long)]
    module_id: String,
    /// `YYYY-MM-DD`
    #[arg(long)]
    date: String,
    /// `HH:MM`
    #[arg(long)]
    time: String,
    /// Grams to dispense.
    #[arg(long)]
    amount: f64,
    #[arg(long, default_value = "pending")]
    status: String,
}

impl ScheduleFields {
    fn to_json(&self) -> Value {
        json!({
            "module_id": self.module_id,
            "feed_date": self.date,
            "feed_time": self.time,
            "amount": self.amount,
            "status": self.status,
        })
    }
}

#[derive(Subcommand, Debug)]
enum SchedulesSubcommand {
    List {
        #[arg(long)]
        start_date: Option<String>,
        #[arg(long)]
        end_date: Option<String>,
        #[arg(long)]
        module_id: Option<String>,
    },
    Add(ScheduleFields),
    /// Create one schedule per day starting at `--start-date`.
    Recurring {
        #[arg(long)]
        module_id: String,
        #[arg(long)]
        start_date: String,
        #[arg(long)]
        time: String,
        #[arg(long)]
        amount: f64,
        #[arg(long, default_value_t = 7)]
        days: u32,
    },
    Update {
        schedule_id: i64,
        #[command(flatten)]
        fields: ScheduleFields,
    },
    Delete {
        schedule_id: i64,
    },
}

#[derive(Args, Debug)]
struct HistoryCommand {
    #[command(subcommand)]
    command: HistorySubcommand,
}

#[derive(Subcommand, Debug)]
enum HistorySubcommand {
    List,
    Delete { history_id: i64 },
}

// =============================================================================
// SNAPSHOTS / ANALYTICS
// =============================================================================

#[derive(Args, Debug)]
struct SnapshotsCommand {
    #[command(subcommand)]
    command: SnapshotsSubcommand,
}

#[derive(Subcommand, Debug)]
enum SnapshotsSubcommand {
    List {
        #[arg(long)]
        cam_id: Option<String>,
    },
    Delete {
        filename: String,
    },
}

#[derive(Args, Debug)]
struct AnalyticsCommand {
    #[command(subcommand)]
    command: AnalyticsSubcommand,
}

#[derive(Subcommand, Debug)]
enum AnalyticsSubcommand {
    Summary,
    Weekly,
    Status,
}

// =============================================================================
// DEVICE
// =============================================================================

#[derive(Args, Debug)]
struct DeviceCommand {
    #[command(subcommand)]
    command: DeviceSubcommand,
}

#[derive(Subcommand, Debug)]
enum DeviceSubcommand {
    /// Report a hopper weight reading.
    Weight {
        module_id: String,
        weight: f64,
    },
    /// Ask whether a schedule is due now.
    Check {
        module_id: String,
    },
    /// Report a schedule as dispensed.
    Complete {
        schedule_id: i64,
        #[arg(long)]
        module_id: Option<String>,
    },
    /// Upload a JPEG snapshot.
    Upload {
        camera_id: String,
        image: PathBuf,
        #[arg(long, default_value = "during", value_parser = ["during", "after"])]
        category: String,
    },
}

// =============================================================================
// DISPATCH
// =============================================================================

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let base_url = cli.base_url;

    let json = match cli.command {
        Command::Ping => return run_ping(&base_url).await,
        Command::Modules(cmd) => run_modules(&base_url, cmd).await?,
        Command::Cameras(cmd) => run_cameras(&base_url, cmd).await?,
        Command::Schedules(cmd) => run_schedules(&base_url, cmd).await?,
        Command::History(cmd) => run_history(&base_url, cmd).await?,
        Command::Snapshots(cmd) => run_snapshots(&base_url, cmd).await?,
        Command::Analytics(cmd) => run_analytics(&base_url, cmd).await?,
        Command::Device(cmd) => run_device(&base_url, cmd).await?,
    };
    print_json(&json)
}

async fn run_ping(base_url: &str) -> Result<(), CliError> {
    let response = reqwest::get(endpoint(base_url, "/health")).await?;
    let status = response.status();
    let text = response.text().await?;
    if !status.is_success() {
        return Err(CliError::ServerError { status: status.as_u16(), message: text });
    }
    println!("{text}");
    Ok(())
}

async fn run_modules(base_url: &str, cmd: ModulesCommand) -> Result<Value, CliError> {
    match cmd.command {
        ModulesSubcommand::List => api_request(base_url, reqwest::Method::GET, "/modules", Body::None).await,
        ModulesSubcommand::Add { module_id, cam_id, status, weight } => {
            let body = json!({ "module_id": module_id, "cam_id": cam_id, "status": status, "weight": weight });
            api_request(base_url, reqwest::Method::POST, "/modules", Body::Json(body)).await
        }
        ModulesSubcommand::Update { module_id, cam_id, status, weight } => {
            let body = json!({ "cam_id": cam_id, "status": status, "weight": weight });
            let path = format!("/modules/{module_id}");
            api_request(base_url, reqwest::Method::PUT, &path, Body::Json(body)).await
        }
        ModulesSubcommand::Delete { module_id } => {
            let path = format!("/modules/{module_id}");
            api_request(base_url, reqwest::Method::DELETE, &path, Body::None).await
        }
    }
}

async fn run_cameras(base_url: &str, cmd: CamerasCommand) -> Result<Value, CliError> {
    match cmd.command {
        CamerasSubcommand::List => api_request(base_url, reqwest::Method::GET, "/cameras", Body::None).await,
        CamerasSubcommand::Add { cam_id, status } => {
            let body = json!({ "cam_id": cam_id, "status": status });
            api_request(base_url, reqwest::Method::POST, "/cameras", Body::Json(body)).await
        }
        CamerasSubcommand::Delete { cam_id } => {
            let path = format!("/cameras/{cam_id}");
            api_request(base_url, reqwest::Method::DELETE, &path, Body::None).await
        }
    }
}

async fn run_schedules(base_url: &str, cmd: SchedulesCommand) -> Result<Value, CliError> {
    match cmd.command {
        SchedulesSubcommand::List { start_date, end_date, module_id } => {
            let path = schedules_query_path(start_date.as_deref(), end_date.as_deref(), module_id.as_deref());
            api_request(base_url, reqwest::Method::GET, &path, Body::None).await
        }
        SchedulesSubcommand::Add(fields) => {
            api_request(base_url, reqwest::Method::POST, "/schedules", Body::Json(fields.to_json())).await
        }
        SchedulesSubcommand::Recurring { module_id, start_date, time, amount, days } => {
            let body = json!({
                "module_id": module_id,
                "start_date": start_date,
                "feed_time": time,
                "amount": amount,
                "days_ahead": days,
            });
            api_request(base_url, reqwest::Method::POST, "/schedules/recurring", Body::Json(body)).await
        }
        SchedulesSubcommand::Update { schedule_id, fields } => {
            let path = format!("/schedules/{schedule_id}");
            api_request(base_url, reqwest::Method::PUT, &path, Body::Json(fields.to_json())).await
        }
        SchedulesSubcommand::Delete { schedule_id } => {
            let path = format!("/schedules/{schedule_id}");
            api_request(base_url, reqwest::Method::DELETE, &path, Body::None).await
        }
    }
}

async fn run_history(base_url: &str, cmd: HistoryCommand) -> Result<Value, CliError> {
    match cmd.command {
        HistorySubcommand::List => api_request(base_url, reqwest::Method::GET, "/history", Body::None).await,
        HistorySubcommand::Delete { history_id } => {
            let path = format!("/history/{history_id}");
            api_request(base_url, reqwest::Method::DELETE, &path, Body::None).await
        }
    }
}

async fn run_snapshots(base_url: &str, cmd: SnapshotsCommand) -> Result<Value, CliError> {
    match cmd.command {
        SnapshotsSubcommand::List { cam_id } => {
            let path = match cam_id {
                Some(cam_id) => format!("/api/snapshots/{cam_id}"),
                None => "/api/snapshots".to_owned(),
            };
            api_request(base_url, reqwest::Method::GET, &path, Body::None).await
        }
        SnapshotsSubcommand::Delete { filename } => {
            let path = format!("/api/snapshots/{filename}");
            api_request(base_url, reqwest::Method::DELETE, &path, Body::None).await
        }
    }
}

async fn run_analytics(base_url: &str, cmd: AnalyticsCommand) -> Result<Value, CliError> {
    let path = match cmd.command {
        AnalyticsSubcommand::Summary => "/analytics/summary",
        AnalyticsSubcommand::Weekly => "/analytics/weekly",
        AnalyticsSubcommand::Status => "/analytics/module-status",
    };
    api_request(base_url, reqwest::Method::GET, path, Body::None).await
}

async fn run_device(base_url: &str, cmd: DeviceCommand) -> Result<Value, CliError> {
    match cmd.command {
        DeviceSubcommand::Weight { module_id, weight } => {
            let form = vec![("module_id", module_id), ("weight", weight.to_string())];
            api_request(base_url, reqwest::Method::POST, "/weight_update", Body::Form(form)).await
        }
        DeviceSubcommand::Check { module_id } => {
            let form = vec![("module_id", module_id)];
            api_request(base_url, reqwest::Method::POST, "/check_schedule", Body::Form(form)).await
        }
        DeviceSubcommand::Complete { schedule_id, module_id } => {
            let mut form = vec![("schedule_id", schedule_id.to_string())];
            if let Some(module_id) = module_id {
                form.push(("module_id", module_id));
            }
            api_request(base_url, reqwest::Method::POST, "/complete_schedule", Body::Form(form)).await
        }
        DeviceSubcommand::Upload { camera_id, image, category } => {
            let bytes = tokio::fs::read(&image)
                .await
                .map_err(|source| CliError::Io { path: image.clone(), source })?;
            let filename = image
                .file_name()
                .map_or_else(|| "snapshot.jpg".to_owned(), |name| name.to_string_lossy().into_owned());
            let part = reqwest::multipart::Part::bytes(bytes).file_name(filename).mime_str("image/jpeg")?;
            let form = reqwest::multipart::Form::new()
                .text("camera_id", camera_id)
                .text("category", category)
                .part("image", part);
            api_request(base_url, reqwest::Method::POST, "/upload_image", Body::Multipart(form)).await
        }
    }
}

// =============================================================================
// HTTP
// =============================================================================

enum Body {
    None,
    Json(Value),
    Form(Vec<(&'static str, String)>),
    Multipart(reqwest::multipart::Form),
}

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

fn schedules_query_path(start_date: Option<&str>, end_date: Option<&str>, module_id: Option<&str>) -> String {
    let params: Vec<String> = [("start_date", start_date), ("end_date", end_date), ("module_id", module_id)]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| format!("{key}={v}")))
        .collect();
    if params.is_empty() { "/schedules".to_owned() } else { format!("/schedules?{}", params.join("&")) }
}

/// Pull the most useful message out of a failed response body.
fn error_message(value: &Value) -> String {
    value
        .get("error")
        .or_else(|| value.get("message"))
        .and_then(Value::as_str)
        .map_or_else(|| value.to_string(), str::to_owned)
}

async fn api_request(base_url: &str, method: reqwest::Method, path: &str, body: Body) -> Result<Value, CliError> {
    let client = reqwest::Client::new();
    let request = client.request(method, endpoint(base_url, path));
    let request = match body {
        Body::None => request,
        Body::Json(json) => request.json(&json),
        Body::Form(form) => request.form(&form),
        Body::Multipart(form) => request.multipart(form),
    };

    let response = request.send().await?;
    let status = response.status();
    let value = response.json::<Value>().await.unwrap_or_else(|_| Value::Object(Map::new()));

    if !status.is_success() {
        return Err(CliError::ServerError { status: status.as_u16(), message: error_message(&value) });
    }

    Ok(value)
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
