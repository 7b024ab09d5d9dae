use exam_core::model::{AnswerForm, QuestionId};
use scraper::{ElementRef, Html, Selector};

use crate::error::FragmentError;

/// Element id of the region that holds the answer form.
pub const CONTENT_REGION_ID: &str = "exam-left-panel";

const CONTENT_REGION_SELECTOR: &str = "#exam-left-panel";
const FORM_SELECTOR: &str = "form";
const OPTION_SELECTOR: &str = r#"input[name="selected_option"]"#;
const CSRF_SELECTOR: &str = r#"[name="csrfmiddlewaretoken"]"#;
const CURRENT_INDEX_SELECTOR: &str = r#"input[name="current_q_index"]"#;
const ACTIVE_SUBJECT_SELECTOR: &str = r#"input[name="active_subject"]"#;
const COURSE_ID_SELECTOR: &str = r#"input[name="course_id"]"#;

/// The parts of a fetched question page the engine splices in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionFragment {
    /// Inner markup of the content region.
    pub region_html: String,
    /// The answer form inside the region, if any.
    pub form: Option<AnswerForm>,
}

/// Parse a question page off-DOM and extract the content region.
///
/// # Errors
///
/// Returns `FragmentError::MissingContentRegion` if the page has no
/// `#exam-left-panel` element.
pub fn parse_fragment(html: &str) -> Result<QuestionFragment, FragmentError> {
    let document = Html::parse_document(html);
    let region_selector = selector(CONTENT_REGION_SELECTOR)?;
    let region = document
        .select(&region_selector)
        .next()
        .ok_or(FragmentError::MissingContentRegion(CONTENT_REGION_ID))?;

    let form_selector = selector(FORM_SELECTOR)?;
    let form = match region.select(&form_selector).next() {
        Some(form) => Some(read_form(form)?),
        None => None,
    };

    Ok(QuestionFragment {
        region_html: region.inner_html(),
        form,
    })
}

fn read_form(form: ElementRef<'_>) -> Result<AnswerForm, FragmentError> {
    let question_id = form
        .value()
        .attr("data-question-id")
        .and_then(|raw| raw.parse::<QuestionId>().ok());

    let option_selector = selector(OPTION_SELECTOR)?;
    let mut options = Vec::new();
    let mut selected_option = None;
    for input in form.select(&option_selector) {
        let element = input.value();
        if element.attr("type") == Some("hidden") {
            continue;
        }
        let Some(value) = element.attr("value") else {
            continue;
        };
        if element.attr("checked").is_some() {
            selected_option = Some(value.to_string());
        }
        options.push(value.to_string());
    }

    Ok(AnswerForm {
        question_id,
        csrf_token: field_value(form, CSRF_SELECTOR)?,
        current_index: field_value(form, CURRENT_INDEX_SELECTOR)?,
        active_subject: field_value(form, ACTIVE_SUBJECT_SELECTOR)?,
        course_id: field_value(form, COURSE_ID_SELECTOR)?,
        options,
        selected_option,
    })
}

fn field_value(form: ElementRef<'_>, css: &'static str) -> Result<Option<String>, FragmentError> {
    let field_selector = selector(css)?;
    Ok(form
        .select(&field_selector)
        .next()
        .and_then(|field| field.value().attr("value"))
        .map(str::to_string))
}

fn selector(css: &'static str) -> Result<Selector, FragmentError> {
    Selector::parse(css).map_err(|_| FragmentError::Selector(css))
}
