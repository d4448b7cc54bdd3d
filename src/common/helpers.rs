use anyhow::Error;

pub fn print_error_chain(err: &Error) {
    // Main context message first, then one indented line per cause
    let error_message = err
        .chain()
        .enumerate()
        .map(|(index, cause)| {
            if index == 0 {
                cause.to_string()
            } else {
                format!("       └> {}", cause)
            }
        })
        .collect::<Vec<String>>()
        .join("\n");

    error!("{}", error_message);
}

/// Quotes an SQL identifier with double quotes, doubling any embedded quote.
pub fn quote_identifier(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}
