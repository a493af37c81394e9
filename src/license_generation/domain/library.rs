use super::Checkout;
use std::cmp::Ordering;

/// Library value object - an external dependency actually reached by the build
///
/// Pairs a checkout with the product (or target) name through which it was
/// reached. Two libraries are equal iff both checkout and name match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Library {
    checkout: Checkout,
    name: String,
}

impl Library {
    pub fn new(checkout: Checkout, name: impl Into<String>) -> Self {
        Self {
            checkout,
            name: name.into(),
        }
    }

    /// A library standing for a whole checkout, named after its directory
    pub fn from_checkout(checkout: Checkout) -> Self {
        let name = checkout.name().to_string();
        Self { checkout, name }
    }

    pub fn checkout(&self) -> &Checkout {
        &self.checkout
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialOrd for Library {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Library {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.checkout.cmp(&other.checkout))
    }
}
