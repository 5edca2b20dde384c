use thiserror::Error;

/// Number of slots in every ring: one current, one previous, one next.
pub const SLOT_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Current,
    Previous,
    Next,
}

impl Role {
    pub const ALL: [Role; SLOT_COUNT] = [Role::Current, Role::Previous, Role::Next];

    // Position in the cyclic order current -> next -> previous.
    fn cycle_index(self) -> usize {
        match self {
            Role::Current => 0,
            Role::Next => 1,
            Role::Previous => 2,
        }
    }

    fn from_cycle_index(index: usize) -> Role {
        match index % SLOT_COUNT {
            0 => Role::Current,
            1 => Role::Next,
            _ => Role::Previous,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RingError {
    #[error("slot element index {0} is out of range")]
    OutOfRange(usize),
    #[error("element {0} is bound to more than one role")]
    Duplicate(usize),
}

/// Three element handles in cyclic order plus a rotation offset.
///
/// Element indices never move; rotating only shifts which index each role
/// resolves to, so every element always holds exactly one role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRing {
    // elements[0] is the initial current, [1] the initial next, [2] the initial previous
    elements: [usize; SLOT_COUNT],
    offset: usize,
}

impl SlotRing {
    pub fn new(current: usize, previous: usize, next: usize) -> Result<Self, RingError> {
        let elements = [current, next, previous];
        for (i, &element) in elements.iter().enumerate() {
            if element >= SLOT_COUNT {
                return Err(RingError::OutOfRange(element));
            }
            if elements[..i].contains(&element) {
                return Err(RingError::Duplicate(element));
            }
        }
        Ok(Self { elements, offset: 0 })
    }

    pub fn element(&self, role: Role) -> usize {
        self.elements[(role.cycle_index() + self.offset) % SLOT_COUNT]
    }

    pub fn role_of(&self, element: usize) -> Option<Role> {
        let position = self.elements.iter().position(|&e| e == element)?;
        Some(Role::from_cycle_index(position + SLOT_COUNT - self.offset))
    }

    /// Role held by each element, indexed by element.
    pub fn assignment(&self) -> [Role; SLOT_COUNT] {
        let mut roles = [Role::Current; SLOT_COUNT];
        for role in Role::ALL {
            roles[self.element(role)] = role;
        }
        roles
    }

    /// `Right` moves next -> current -> previous -> next; `Left` is the inverse.
    pub fn rotate(&mut self, direction: Direction) {
        self.offset = match direction {
            Direction::Right => (self.offset + 1) % SLOT_COUNT,
            Direction::Left => (self.offset + SLOT_COUNT - 1) % SLOT_COUNT,
        };
    }
}
