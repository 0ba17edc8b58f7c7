use crate::error::Error;
use crate::pattern::Pattern;
use crate::table::{Handler, OpcodeTable};

/// Write `handler` into every slot the pattern denotes.
/// Placeholders are resolved rightmost first, 16 digits each.
/// Returns the number of slots written.
pub fn expand(pattern: Pattern, handler: &Handler, table: &mut OpcodeTable) -> usize {
    match pattern.rightmost_placeholder() {
        None => match pattern.code() {
            Some(code) => {
                table.assign(code, handler);
                1
            }
            None => 0,
        },
        Some(pos) => (0..16)
            .map(|digit| expand(pattern.substitute(pos, digit), handler, table))
            .sum(),
    }
}

/// Parse then expand. A malformed pattern leaves the table untouched.
pub fn expand_str(text: &str, handler: &Handler, table: &mut OpcodeTable) -> Result<usize, Error> {
    let pattern = Pattern::parse(text)?;
    Ok(expand(pattern, handler, table))
}
