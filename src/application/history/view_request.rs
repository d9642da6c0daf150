use crate::domain::{ViewRequest, basename};

/// Query parameters of a view address, in their fixed order.
pub fn query_parameters(request: &ViewRequest) -> Vec<(&'static str, String)> {
    let file = request
        .file_path
        .as_ref()
        .map(|path| urlencoding::encode(&path.to_string_lossy()).into_owned())
        .unwrap_or_default();

    vec![
        ("id", request.id.clone()),
        ("port", request.server_port.to_string()),
        ("file", file),
        ("branchSelection", request.selection.to_string()),
        ("locale", urlencoding::encode(&request.locale).into_owned()),
        (
            "branchName",
            urlencoding::encode(&request.branch_name).into_owned(),
        ),
    ]
}

pub fn build_address(preview_base: &str, request: &ViewRequest) -> String {
    let query = query_parameters(request)
        .into_iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");
    format!("{preview_base}?{query}")
}

/// `multiple_roots` tells whether the workspace holds more than one repository.
pub fn build_title(request: &ViewRequest, multiple_roots: bool) -> String {
    match (&request.file_path, request.line_number) {
        (Some(file), None) => format!("File History ({})", basename(file)),
        (Some(file), Some(line)) => format!("Line History ({}#{})", basename(file), line),
        (None, _) if multiple_roots => {
            format!("Git History ({})", request.repository_root.basename())
        }
        (None, _) => "Git History".to_string(),
    }
}
