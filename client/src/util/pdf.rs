//! PDF report export through the page-level `html2pdf` bundle.
//!
//! SYSTEM CONTEXT
//! ==============
//! The app shell loads `html2pdf.bundle.min.js`, which exposes a global
//! `html2pdf()` worker factory. Views hand this module the element they want
//! exported; it deep-clones the subtree, strips interactive controls, prepends
//! a report header, and asks the worker to render and download the file.
//!
//! Elements marked with `data-pdf-strip` (action columns, cells) and every
//! `<button>` are removed from the clone only; the live DOM is untouched.

#[cfg(test)]
#[path = "pdf_test.rs"]
mod pdf_test;

use chrono::NaiveDate;
use serde::Serialize;

/// Attribute marking elements that must not appear in exported reports.
pub const PDF_STRIP_ATTR: &str = "data-pdf-strip";

/// Which dashboard view a report is generated from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportKind {
    Camera,
    History,
    Analytics,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl ReportKind {
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Camera => "Camera Monitoring Report",
            Self::History => "Feeding History Report",
            Self::Analytics => "Analytics Report",
        }
    }

    fn file_stem(self) -> &'static str {
        match self {
            Self::Camera => "camera-monitoring",
            Self::History => "feeding-history",
            Self::Analytics => "analytics-report",
        }
    }

    #[must_use]
    pub fn filename(self, date: NaiveDate) -> String {
        format!("{}-{}.pdf", self.file_stem(), date.format("%Y-%m-%d"))
    }

    #[must_use]
    pub fn orientation(self) -> Orientation {
        match self {
            Self::History => Orientation::Landscape,
            Self::Camera | Self::Analytics => Orientation::Portrait,
        }
    }

    #[must_use]
    pub fn scale(self) -> f64 {
        match self {
            Self::Analytics => 1.5,
            Self::Camera | Self::History => 2.0,
        }
    }

    fn image_quality(self) -> f64 {
        match self {
            Self::Analytics => 0.95,
            Self::Camera | Self::History => 0.98,
        }
    }

    /// Converter options for this report.
    #[must_use]
    pub fn options(self, date: NaiveDate) -> PdfOptions {
        PdfOptions {
            margin: 10.0,
            filename: self.filename(date),
            image: ImageOptions { kind: "jpeg", quality: self.image_quality() },
            html2canvas: CanvasOptions { scale: self.scale(), use_cors: true },
            js_pdf: PageOptions { unit: "mm", format: "a4", orientation: self.orientation() },
        }
    }
}

/// Option object accepted by `html2pdf().set(...)`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PdfOptions {
    pub margin: f64,
    pub filename: String,
    pub image: ImageOptions,
    pub html2canvas: CanvasOptions,
    #[serde(rename = "jsPDF")]
    pub js_pdf: PageOptions,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ImageOptions {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub quality: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CanvasOptions {
    pub scale: f64,
    #[serde(rename = "useCORS")]
    pub use_cors: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PageOptions {
    pub unit: &'static str,
    pub format: &'static str,
    pub orientation: Orientation,
}

#[cfg(feature = "hydrate")]
mod bindings {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen]
    extern "C" {
        pub type Html2PdfWorker;

        #[wasm_bindgen(js_name = html2pdf, catch)]
        pub fn html2pdf() -> Result<Html2PdfWorker, JsValue>;

        #[wasm_bindgen(method)]
        pub fn set(this: &Html2PdfWorker, options: &JsValue) -> Html2PdfWorker;

        #[wasm_bindgen(method)]
        pub fn from(this: &Html2PdfWorker, source: &web_sys::Element) -> Html2PdfWorker;

        #[wasm_bindgen(method)]
        pub fn save(this: &Html2PdfWorker) -> js_sys::Promise;
    }
}

/// Render `source` into a downloaded PDF report.
///
/// `generated_at` is printed under the title; `today` names the file.
///
/// # Errors
///
/// Returns an error string when the DOM is unavailable, the converter script
/// is missing, or rendering fails.
#[cfg(feature = "hydrate")]
pub async fn export_report(
    kind: ReportKind,
    source: &web_sys::Element,
    today: NaiveDate,
    generated_at: &str,
) -> Result<(), String> {
    use wasm_bindgen::JsCast;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| "document unavailable".to_owned())?;
    let js_err = |e: wasm_bindgen::JsValue| format!("{e:?}");

    let clone = source
        .clone_node_with_deep(true)
        .map_err(js_err)?
        .dyn_into::<web_sys::Element>()
        .map_err(|_| "export source is not an element".to_owned())?;
    let selector = format!("button, [{PDF_STRIP_ATTR}]");
    let strip = clone.query_selector_all(&selector).map_err(js_err)?;
    for i in 0..strip.length() {
        if let Some(node) = strip.item(i)
            && let Ok(el) = node.dyn_into::<web_sys::Element>()
        {
            el.remove();
        }
    }

    let report = document.create_element("div").map_err(js_err)?;
    report.set_class_name("pdf-report");
    let heading = document.create_element("h1").map_err(js_err)?;
    heading.set_text_content(Some(kind.title()));
    let stamp = document.create_element("p").map_err(js_err)?;
    stamp.set_class_name("pdf-report__generated");
    stamp.set_text_content(Some(&format!("Generated on: {generated_at}")));
    report.append_child(&heading).map_err(js_err)?;
    report.append_child(&stamp).map_err(js_err)?;
    report.append_child(&clone).map_err(js_err)?;

    let options = serde_wasm_bindgen::to_value(&kind.options(today)).map_err(|e| e.to_string())?;
    let worker = bindings::html2pdf().map_err(|_| "PDF converter not loaded".to_owned())?;
    let promise = worker.set(&options).from(&report).save();
    wasm_bindgen_futures::JsFuture::from(promise).await.map_err(js_err)?;
    log::info!("pdf: exported {}", kind.filename(today));
    Ok(())
}
