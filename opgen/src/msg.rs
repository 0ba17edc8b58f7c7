use color_print::ceprintln;

/// Scanned input kept around for pointing at lines.
pub struct Source<'a> {
    pub path: &'a str,
    pub lines: &'a [String],
}

impl Source<'_> {
    /// `idx` is 0-based, the pointer shows it 1-based.
    pub fn line(&self, idx: usize) -> (usize, &str) {
        let raw = self.lines.get(idx).map(|s| s.as_str()).unwrap_or("");
        (idx + 1, raw)
    }
}

#[derive(Debug)]
pub enum Msg {
    Error(String),
    Warn(String),
    Note(String),
}

impl Msg {
    pub fn print(&self) {
        match self {
            Msg::Error(msg) => ceprintln!("<red,bold>error</>: {}", msg),
            Msg::Warn(msg) => ceprintln!("<yellow,bold>warn</>: {}", msg),
            Msg::Note(msg) => ceprintln!("<green,bold>note</>: {}", msg),
        }
    }

    pub fn at(&self, src: &Source, idx: usize) {
        self.print();
        let (no, raw) = src.line(idx);
        ceprintln!("     <blue>--></> <underline>{}:{}</>", src.path, no);
        ceprintln!("      <blue>|</>");
        ceprintln!(" <blue>{:>4} |</> {}", no, raw);
        ceprintln!("      <blue>|</>");
    }
}
