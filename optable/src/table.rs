use std::fmt;

/// Number of slots: one per 16-bit opcode.
pub const TABLE_LEN: usize = 1 << 16;

/// Handler invoked for opcodes nothing claims ("unknown instruction callback").
pub const DEFAULT_SENTINEL: &str = "chip8_uic";

// ----------------------------------------------------------------------------
// Handler

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Handler(String);

impl Handler {
    pub fn new(name: &str) -> Self {
        Handler(name.to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Handler {
    fn from(name: &str) -> Self {
        Handler::new(name)
    }
}

// ----------------------------------------------------------------------------
// Collision

/// A slot written by one pattern and then overwritten by a later one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    pub code: u16,
    pub previous: Handler,
    pub current: Handler,
}

// ----------------------------------------------------------------------------
// Opcode Table

pub struct OpcodeTable {
    sentinel: Handler,
    slots: Vec<Handler>,
    assigned: Vec<bool>,
    collisions: Option<Vec<Collision>>,
}

impl OpcodeTable {
    pub fn new(sentinel: &str) -> Self {
        let sentinel = Handler::new(sentinel);
        OpcodeTable {
            slots: vec![sentinel.clone(); TABLE_LEN],
            assigned: vec![false; TABLE_LEN],
            sentinel,
            collisions: None,
        }
    }

    /// Record every overwrite of an already assigned slot.
    pub fn track_collisions(mut self) -> Self {
        self.collisions = Some(vec![]);
        self
    }

    /// Last writer wins.
    pub fn assign(&mut self, code: u16, handler: &Handler) {
        let idx = code as usize;
        if self.assigned[idx] {
            if let Some(collisions) = &mut self.collisions {
                collisions.push(Collision {
                    code,
                    previous: self.slots[idx].clone(),
                    current: handler.clone(),
                });
            }
        }
        self.slots[idx] = handler.clone();
        self.assigned[idx] = true;
    }

    pub fn get(&self, code: u16) -> &Handler {
        &self.slots[code as usize]
    }

    pub fn sentinel(&self) -> &Handler {
        &self.sentinel
    }

    pub fn is_assigned(&self, code: u16) -> bool {
        self.assigned[code as usize]
    }

    /// Opcodes written by at least one expansion, ascending.
    pub fn assigned(&self) -> impl Iterator<Item = u16> + '_ {
        (0..=u16::MAX).filter(move |code| self.is_assigned(*code))
    }

    pub fn assigned_count(&self) -> usize {
        self.assigned.iter().filter(|a| **a).count()
    }

    pub fn collisions(&self) -> &[Collision] {
        self.collisions.as_deref().unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Handler> {
        self.slots.iter()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Default for OpcodeTable {
    fn default() -> Self {
        OpcodeTable::new(DEFAULT_SENTINEL)
    }
}
