//! Body categories and contact classification
//!
//! Categories are bit flags so the engine can filter collisions with masks.
//! Contact dispatch never compares raw unions though: a pair is normalized
//! into a [`ContactKind`] first, so `(a, b)` and `(b, a)` always agree.

use std::ops::BitOr;

use serde::{Deserialize, Serialize};

/// Semantic role of a physics body
///
/// Declared in bit order so `Ord` sorts pairs by flag value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    None,
    /// The cat
    Actor,
    /// Tap-to-destroy block
    Obstacle,
    /// The bed
    Goal,
    /// Edge loop around the playable area
    Boundary,
    /// Floating outcome label
    Message,
    Spring,
    /// The swinging hook
    HookActor,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::None,
        Category::Actor,
        Category::Obstacle,
        Category::Goal,
        Category::Boundary,
        Category::Message,
        Category::Spring,
        Category::HookActor,
    ];

    /// Bit flag for this category
    pub const fn bits(self) -> u32 {
        match self {
            Category::None => 0,
            Category::Actor => 1 << 0,
            Category::Obstacle => 1 << 1,
            Category::Goal => 1 << 2,
            Category::Boundary => 1 << 3,
            Category::Message => 1 << 4,
            Category::Spring => 1 << 5,
            Category::HookActor => 1 << 6,
        }
    }

    pub const fn mask(self) -> CategoryMask {
        CategoryMask(self.bits())
    }
}

/// Union of category flags (collision/contact-test masks, contact unions)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CategoryMask(pub u32);

impl CategoryMask {
    pub const NONE: CategoryMask = CategoryMask(0);

    pub const fn contains(self, category: Category) -> bool {
        let bits = category.bits();
        bits != 0 && self.0 & bits == bits
    }
}

impl From<Category> for CategoryMask {
    fn from(category: Category) -> Self {
        category.mask()
    }
}

impl BitOr for CategoryMask {
    type Output = CategoryMask;
    fn bitor(self, rhs: Self) -> Self {
        CategoryMask(self.0 | rhs.0)
    }
}

impl BitOr<Category> for CategoryMask {
    type Output = CategoryMask;
    fn bitor(self, rhs: Category) -> Self {
        CategoryMask(self.0 | rhs.bits())
    }
}

impl BitOr for Category {
    type Output = CategoryMask;
    fn bitor(self, rhs: Self) -> CategoryMask {
        CategoryMask(self.bits() | rhs.bits())
    }
}

/// Contact pairs the level reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactKind {
    /// Actor|Goal
    ActorReachedGoal,
    /// Actor|Boundary
    ActorFellOff,
    /// Message|Boundary
    MessageBounced,
    /// Actor|HookActor
    ActorCaughtHook,
}

impl ContactKind {
    /// Classify an unordered category pair; `None` for pairs nobody handles
    pub fn classify(a: Category, b: Category) -> Option<Self> {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        match (lo, hi) {
            (Category::Actor, Category::Goal) => Some(ContactKind::ActorReachedGoal),
            (Category::Actor, Category::Boundary) => Some(ContactKind::ActorFellOff),
            (Category::Boundary, Category::Message) => Some(ContactKind::MessageBounced),
            (Category::Actor, Category::HookActor) => Some(ContactKind::ActorCaughtHook),
            _ => None,
        }
    }

    /// The contact union this kind stands for
    pub fn union(self) -> CategoryMask {
        match self {
            ContactKind::ActorReachedGoal => Category::Actor | Category::Goal,
            ContactKind::ActorFellOff => Category::Actor | Category::Boundary,
            ContactKind::MessageBounced => Category::Message | Category::Boundary,
            ContactKind::ActorCaughtHook => Category::Actor | Category::HookActor,
        }
    }
}

/// Physics filter for one body: what it is, what it bounces off, what it reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyFilter {
    pub category: CategoryMask,
    pub collision: CategoryMask,
    pub contact_test: CategoryMask,
}

impl BodyFilter {
    /// Standard filter for bodies of `category`
    pub fn for_category(category: Category) -> Self {
        let (collision, contact_test) = match category {
            Category::Actor => (
                Category::Obstacle | Category::Boundary | Category::Spring,
                Category::Goal | Category::Boundary,
            ),
            Category::Goal => (CategoryMask::NONE, CategoryMask::NONE),
            Category::Message => (Category::Boundary.mask(), Category::Boundary.mask()),
            Category::HookActor => (CategoryMask::NONE, Category::Actor.mask()),
            // Engine defaults: collide with everything, report nothing
            _ => (CategoryMask(u32::MAX), CategoryMask::NONE),
        };
        Self {
            category: category.mask(),
            collision,
            contact_test,
        }
    }
}
