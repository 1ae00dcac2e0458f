use crate::format::Format;

/// Guess a format from a path argument's suffix.
/// `-` names a standard stream and never has a format.
pub fn infer_format(arg: &str) -> Option<Format> {
    if arg == "-" {
        None
    } else if arg.ends_with(".json") {
        Some(Format::Json)
    } else if arg.ends_with(".csv") {
        Some(Format::Csv)
    } else {
        None
    }
}
