use crate::compliance::Regulation;

/// Build the analysis prompt for one regulation.
///
/// Contract and regulation text are each cut to `max_chars` characters.
#[must_use]
pub fn build_prompt(contract_text: &str, regulation: &Regulation, max_chars: usize) -> String {
    let name = &regulation.filename;
    let contract = truncate_chars(contract_text, max_chars);
    let rules = truncate_chars(&regulation.content, max_chars);

    format!(
        "Perform a compliance analysis and follow these instructions strictly:\n\
         1. Analyze whether the contract below meets the requirements of {name}. \
         Contract content that does not conflict with {name} counts as compliant.\n\
         2. Content that {name} covers but the contract omits is not a conflict.\n\
         3. Where the contract does conflict, cite the specific non-compliant clauses \
         and give a suggested revision for each.\n\
         4. Based on the regulation, list the content the contract should add.\n\
         \n\
         Contract content:\n\
         {contract}\n\
         \n\
         Regulation content:\n\
         {rules}\n\
         \n\
         Return the result as a structured report containing: the name of the \
         regulation analyzed, the compliance status, issues and suggested revisions \
         (as a table), and content that should be added (as a table).\n\
         Do not include an issuing organization or a date.\n"
    )
}

/// The first `max` characters of `text`.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
