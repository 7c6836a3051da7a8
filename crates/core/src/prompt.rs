use crate::doc_type::DocType;
use crate::error::GenerateError;

/// System instruction sent with every request.
pub const SYSTEM_PROMPT: &str = "You are an expert Git documentation writer and senior software engineer. \
Your task is to generate concise, professional, and accurate documentation based on the user's input. \
The input could be raw code, a 'git diff' output, or a high-level summary of changes. \
You must strictly follow the user's requested documentation format. \
For 'Conventional Commit', follow the format: <type>[optional scope]: <description>. \
Example: 'feat(api): add new user endpoint' \
For 'Pull Request Description', provide a clear summary and describe the changes in bullet points.";

pub const PICKER_PLACEHOLDER: &str = "What kind of documentation do you want to generate?";

pub const PROGRESS_TITLE: &str = "Generating Git Documentation...";

pub const SUCCESS_MESSAGE: &str = "Git documentation copied to clipboard!";

pub const EMPTY_SELECTION_MESSAGE: &str = "Please select some code, diff, or text first.";

/// Reject selections that carry no content.
pub fn validate_selection(selection: &str) -> Result<&str, GenerateError> {
    if selection.trim().is_empty() {
        return Err(GenerateError::Input(EMPTY_SELECTION_MESSAGE.to_string()));
    }
    Ok(selection)
}

/// Build the user turn. The selection is interpolated untouched.
pub fn build_user_query(doc_type: DocType, selection: &str) -> String {
    format!(
        "Generate a \"{}\" for the following changes:\n\n{}",
        doc_type.label(),
        selection
    )
}
