use services::CONTENT_REGION_ID;
use url::Url;

fn js_string(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}

pub(crate) fn replace_history_script(url: &Url) -> String {
    format!(
        r#"(function() {{
                try {{
                    window.history.replaceState(window.history.state, "", {url});
                }} catch (_) {{}}
            }})();"#,
        url = js_string(url.as_str()),
    )
}

pub(crate) fn assign_location_script(url: &Url) -> String {
    format!("window.location.assign({});", js_string(url.as_str()))
}

/// Retarget the live answer form and post it. Hidden fields are created once
/// and reused if the post is retried.
pub(crate) fn submit_form_script(action: &Url, hidden_fields: &[(String, String)]) -> String {
    let fields = serde_json::Value::from(
        hidden_fields
            .iter()
            .map(|(name, value)| serde_json::json!([name, value]))
            .collect::<Vec<_>>(),
    );
    format!(
        r#"(function() {{
                const form = document.querySelector({form_selector});
                if (!form) {{
                    return;
                }}
                for (const [name, value] of {fields}) {{
                    let input = form.querySelector('input[type="hidden"][data-safety="' + name + '"]');
                    if (!input) {{
                        input = document.createElement("input");
                        input.type = "hidden";
                        input.name = name;
                        input.dataset.safety = name;
                        form.appendChild(input);
                    }}
                    input.value = value;
                }}
                form.action = {action};
                form.method = "post";
                form.submit();
            }})();"#,
        form_selector = js_string(&format!("#{CONTENT_REGION_ID} form")),
        fields = fields,
        action = js_string(action.as_str()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_quoted_for_js() {
        let url = Url::parse("http://exam.local/exam/C1/start/?subject=A%22B&q=7").unwrap();
        let script = replace_history_script(&url);
        assert!(script.contains(r#""http://exam.local/exam/C1/start/?subject=A%22B&q=7""#));
        assert_eq!(
            assign_location_script(&Url::parse("http://exam.local/r").unwrap()),
            r#"window.location.assign("http://exam.local/r");"#
        );
    }

    #[test]
    fn submit_script_carries_hidden_fields() {
        let action = Url::parse("http://exam.local/student/calculate-marks").unwrap();
        let script = submit_form_script(
            &action,
            &[("selected_option".to_string(), "B".to_string())],
        );
        assert!(script.contains(r#"[["selected_option","B"]]"#));
        assert!(script.contains(r##""#exam-left-panel form""##));
        assert!(script.contains(r#"form.action = "http://exam.local/student/calculate-marks";"#));
    }
}
