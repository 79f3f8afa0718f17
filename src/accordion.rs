/// Single-open accordion: opening one card closes the rest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Accordion {
    open: Option<usize>,
}

impl Accordion {
    pub fn toggled(self, index: usize) -> Self {
        let open = if self.open == Some(index) {
            None
        } else {
            Some(index)
        };
        Self { open }
    }

    pub fn is_open(self, index: usize) -> bool {
        self.open == Some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_one_closes_the_others() {
        let accordion = Accordion::default().toggled(0).toggled(2);

        assert!(!accordion.is_open(0));
        assert!(accordion.is_open(2));
        assert!(!accordion.is_open(1));
    }

    #[test]
    fn clicking_open_card_closes_everything() {
        let accordion = Accordion::default().toggled(1).toggled(1);
        assert!((0..3).all(|index| !accordion.is_open(index)));
    }
}
