//! Per-session UI state: what the user typed, what came back, what is selected.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::card::{Card, GenerationOptions};

/// Everything the studio page renders, kept in the user's session.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Studio {
    /// Last submitted topic
    pub topic: String,
    /// Last submitted generation settings
    pub options: GenerationOptions,
    /// Cards from the most recent successful generation
    pub cards: Vec<Card>,
    /// Ids of the selected cards
    pub selected: BTreeSet<i64>,
}

impl Studio {
    /// Swaps in a freshly generated deck and clears the selection.
    pub fn replace_cards(&mut self, cards: Vec<Card>) {
        self.cards = cards;
        self.selected.clear();
    }

    /// Flips selection of a card. Returns whether it is selected afterwards;
    /// ids that aren't in the current deck are ignored.
    pub fn toggle(&mut self, id: i64) -> bool {
        if !self.cards.iter().any(|card| card.id == id) {
            return false;
        }
        if self.selected.remove(&id) {
            false
        } else {
            self.selected.insert(id);
            true
        }
    }

    /// Selects every card in the deck.
    pub fn select_all(&mut self) {
        self.selected = self.cards.iter().map(|card| card.id).collect();
    }

    /// Clears the selection.
    pub fn deselect_all(&mut self) {
        self.selected.clear();
    }

    /// Whether a card id is selected.
    pub fn is_selected(&self, id: i64) -> bool {
        self.selected.contains(&id)
    }

    /// Selected cards, in deck order.
    pub fn selected_cards(&self) -> Vec<&Card> {
        self.cards
            .iter()
            .filter(|card| self.is_selected(card.id))
            .collect()
    }

    /// Back to a blank studio.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: i64) -> Card {
        Card {
            id,
            title: format!("Card {id}"),
            content: "Body.".to_string(),
            image_url: format!("https://img.example/?{id}"),
        }
    }

    fn studio_with(ids: &[i64]) -> Studio {
        let mut studio = Studio::default();
        studio.replace_cards(ids.iter().copied().map(card).collect());
        studio
    }

    #[test]
    fn toggle_flips_selection() {
        let mut studio = studio_with(&[1, 2, 3]);
        assert!(studio.toggle(2));
        assert!(studio.is_selected(2));
        assert!(!studio.toggle(2));
        assert!(!studio.is_selected(2));
    }

    #[test]
    fn toggling_unknown_card_is_ignored() {
        let mut studio = studio_with(&[1]);
        assert!(!studio.toggle(42));
        assert!(studio.selected.is_empty());
    }

    #[test]
    fn selected_cards_follow_deck_order() {
        let mut studio = studio_with(&[3, 1, 2]);
        studio.toggle(2);
        studio.toggle(3);
        let ids: Vec<i64> = studio.selected_cards().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[test]
    fn select_all_then_none() {
        let mut studio = studio_with(&[1, 2, 3]);
        studio.select_all();
        assert_eq!(studio.selected_cards().len(), 3);
        studio.deselect_all();
        assert!(studio.selected_cards().is_empty());
    }

    #[test]
    fn new_deck_clears_selection() {
        let mut studio = studio_with(&[1, 2]);
        studio.select_all();
        studio.replace_cards(vec![card(1)]);
        assert!(studio.selected.is_empty());
        assert_eq!(studio.cards.len(), 1);
    }

    #[test]
    fn reset_clears_everything() {
        let mut studio = studio_with(&[1]);
        studio.topic = "tea".to_string();
        studio.select_all();
        studio.reset();
        assert_eq!(studio, Studio::default());
    }
}
