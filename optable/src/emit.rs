use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::table::OpcodeTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumString, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Format {
    #[default]
    C,
    Rust,
}

impl Format {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_ascii_lowercase().parse::<Self>() {
            Ok(f) => Ok(f),
            Err(_) => Err(format!("Unknown format: {s}")),
        }
    }
}

/// Declaration framing around the handler list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    pub name: String,
    /// Parameter list of the C function pointer type
    pub c_params: String,
    /// Element type of the Rust array
    pub rust_type: String,
    /// Entries per line, 0 keeps the whole initializer on one line
    pub per_line: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            name: "opcode_table".to_string(),
            c_params: "chip8_t*,opcode_params_t*".to_string(),
            rust_type: "Handler".to_string(),
            per_line: 0,
        }
    }
}

pub fn render(table: &OpcodeTable, format: Format, layout: &Layout) -> String {
    match format {
        Format::C => render_c(table, layout),
        Format::Rust => render_rust(table, layout),
    }
}

/// `static void (*opcode_table[65536]) (chip8_t*,opcode_params_t*) = {...};`
pub fn render_c(table: &OpcodeTable, layout: &Layout) -> String {
    format!(
        "static void (*{}[{}]) ({}) = {{{}}};\n",
        layout.name,
        table.len(),
        layout.c_params,
        body(table, layout.per_line, ",")
    )
}

/// `pub static OPCODE_TABLE: [Handler; 65536] = [...];`
pub fn render_rust(table: &OpcodeTable, layout: &Layout) -> String {
    format!(
        "pub static {}: [{}; {}] = [{}];\n",
        layout.name.to_ascii_uppercase(),
        layout.rust_type,
        table.len(),
        body(table, layout.per_line, ", ")
    )
}

fn body(table: &OpcodeTable, per_line: usize, sep: &str) -> String {
    let names: Vec<&str> = table.iter().map(|h| h.as_str()).collect();
    if per_line == 0 {
        return names.join(sep);
    }
    let rows: Vec<String> = names
        .chunks(per_line)
        .map(|row| format!("    {}", row.join(sep).trim_end()))
        .collect();
    let glue = format!("{}\n", sep.trim_end());
    format!("\n{},\n", rows.join(glue.as_str()))
}
