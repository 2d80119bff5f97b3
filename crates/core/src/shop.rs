use crate::{
    Card, CardOdds, Content, Edition, JokerDef, PackDef, PackKind, Rank, RngState, Seal, ShopRule,
    Suit, VoucherDef,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShopOfferRef {
    Joker(usize),
    Voucher,
    Pack(usize),
}

/// A single shop slot's contents, borrowed from the shop.
#[derive(Debug, Clone, Copy)]
pub enum ShopOffer<'a> {
    Joker(&'a JokerDef),
    Voucher(&'a VoucherDef),
    Pack(&'a PackDef),
}

impl ShopOffer<'_> {
    pub fn id(&self) -> &str {
        match self {
            ShopOffer::Joker(def) => &def.id,
            ShopOffer::Voucher(def) => &def.id,
            ShopOffer::Pack(def) => &def.id,
        }
    }

    pub fn cost(&self) -> i64 {
        match self {
            ShopOffer::Joker(def) => def.cost,
            ShopOffer::Voucher(def) => def.cost,
            ShopOffer::Pack(def) => def.cost,
        }
    }
}

/// Offers for one shop visit. Bought slots become `None` and stay empty
/// until the next reroll or visit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShopState {
    pub jokers: Vec<Option<JokerDef>>,
    pub voucher: Option<VoucherDef>,
    pub packs: Vec<Option<PackDef>>,
    pub reroll_cost: i64,
    pub free_reroll_used: bool,
}

impl ShopState {
    pub fn generate(
        rule: &ShopRule,
        content: &Content,
        rng: &mut RngState,
        owned_jokers: &[&str],
        purchased_vouchers: &[String],
    ) -> Self {
        let jokers = generate_jokers(rule, content, rng, owned_jokers);
        let voucher = content.pick_voucher(purchased_vouchers, rng).cloned();
        let packs = generate_packs(rule, content, rng);
        Self {
            jokers,
            voucher,
            packs,
            reroll_cost: rule.reroll_base,
            free_reroll_used: false,
        }
    }

    /// Regenerates the joker and pack offers; the voucher offer is kept.
    pub fn reroll(
        &mut self,
        rule: &ShopRule,
        content: &Content,
        rng: &mut RngState,
        owned_jokers: &[&str],
    ) {
        self.jokers = generate_jokers(rule, content, rng, owned_jokers);
        self.packs = generate_packs(rule, content, rng);
    }

    pub fn offer(&self, offer: ShopOfferRef) -> Option<ShopOffer<'_>> {
        match offer {
            ShopOfferRef::Joker(index) => self
                .jokers
                .get(index)
                .and_then(Option::as_ref)
                .map(ShopOffer::Joker),
            ShopOfferRef::Voucher => self.voucher.as_ref().map(ShopOffer::Voucher),
            ShopOfferRef::Pack(index) => self
                .packs
                .get(index)
                .and_then(Option::as_ref)
                .map(ShopOffer::Pack),
        }
    }

    /// Empties the slot behind `offer`.
    pub fn clear(&mut self, offer: ShopOfferRef) {
        match offer {
            ShopOfferRef::Joker(index) => {
                if let Some(slot) = self.jokers.get_mut(index) {
                    *slot = None;
                }
            }
            ShopOfferRef::Voucher => self.voucher = None,
            ShopOfferRef::Pack(index) => {
                if let Some(slot) = self.packs.get_mut(index) {
                    *slot = None;
                }
            }
        }
    }
}

/// Distinct jokers not already on the roster; short if the pool runs dry.
fn generate_jokers(
    rule: &ShopRule,
    content: &Content,
    rng: &mut RngState,
    owned_jokers: &[&str],
) -> Vec<Option<JokerDef>> {
    let mut excluded: Vec<&str> = owned_jokers.to_vec();
    let mut offers = Vec::with_capacity(rule.joker_offers);
    for _ in 0..rule.joker_offers {
        let picked = content.pick_joker(&excluded, rng);
        if let Some(def) = picked {
            excluded.push(def.id.as_str());
        }
        offers.push(picked.cloned());
    }
    offers
}

fn generate_packs(rule: &ShopRule, content: &Content, rng: &mut RngState) -> Vec<Option<PackDef>> {
    let second = if rng.chance(rule.buffoon_pack_chance) {
        PackKind::Buffoon
    } else {
        PackKind::Standard
    };
    vec![
        content.pack(PackKind::Celestial).cloned(),
        content.pack(second).cloned(),
    ]
}

/// Rolls an edition (if the card has none) and a seal (if it has none).
/// Editions use one roll checked polychrome, then holographic, then foil.
pub fn roll_card_modifiers(card: &mut Card, odds: &CardOdds, rng: &mut RngState) {
    if card.edition.is_none() {
        let roll = rng.next_f64();
        card.edition = if roll < odds.polychrome {
            Some(Edition::Polychrome)
        } else if roll < odds.polychrome + odds.holographic {
            Some(Edition::Holographic)
        } else if roll < odds.polychrome + odds.holographic + odds.foil {
            Some(Edition::Foil)
        } else {
            None
        };
    }
    if card.seal.is_none() && rng.chance(odds.seal) {
        card.seal = rng.index(Seal::ALL.len()).map(|idx| Seal::ALL[idx]);
    }
}

/// A uniformly random suit and rank with rolled modifiers and no id yet.
pub fn random_card(odds: &CardOdds, rng: &mut RngState) -> Card {
    let suit = rng.index(Suit::ALL.len()).map_or(Suit::Spades, |idx| Suit::ALL[idx]);
    let rank = rng.index(Rank::ALL.len()).map_or(Rank::Ace, |idx| Rank::ALL[idx]);
    let mut card = Card::standard(suit, rank);
    roll_card_modifiers(&mut card, odds, rng);
    card
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{JokerEffect, VoucherEffect};

    fn content() -> Content {
        let joker = |id: &str| JokerDef {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            cost: 4,
            effect: JokerEffect::FlatChips { value: 10 },
        };
        let pack = |id: &str, kind| PackDef {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            cost: 4,
            kind,
            contains: 1,
        };
        Content {
            jokers: vec![joker("a"), joker("b"), joker("c")],
            vouchers: vec![VoucherDef {
                id: "v".to_string(),
                name: "v".to_string(),
                description: String::new(),
                cost: 10,
                effect: VoucherEffect::FreeReroll,
            }],
            packs: vec![
                pack("celestial", PackKind::Celestial),
                pack("standard", PackKind::Standard),
                pack("buffoon", PackKind::Buffoon),
            ],
            ..Content::default()
        }
    }

    #[test]
    fn shop_skips_owned_jokers_and_purchased_vouchers() {
        let content = content();
        let mut rng = RngState::from_seed(3);
        let rule = crate::GameConfig::default().shop;
        let shop = ShopState::generate(&rule, &content, &mut rng, &["a"], &["v".to_string()]);
        let ids: Vec<&str> = shop.jokers.iter().flatten().map(|j| j.id.as_str()).collect();
        assert_eq!(ids.len(), 2);
        assert!(!ids.contains(&"a"));
        assert_ne!(ids[0], ids[1]);
        assert!(shop.voucher.is_none());
        assert_eq!(shop.packs[0].as_ref().unwrap().kind, PackKind::Celestial);
        assert_eq!(shop.reroll_cost, 1);
    }

    #[test]
    fn cleared_offer_is_gone() {
        let content = content();
        let mut rng = RngState::from_seed(9);
        let rule = crate::GameConfig::default().shop;
        let mut shop = ShopState::generate(&rule, &content, &mut rng, &[], &[]);
        assert!(shop.offer(ShopOfferRef::Voucher).is_some());
        shop.clear(ShopOfferRef::Voucher);
        shop.clear(ShopOfferRef::Joker(0));
        assert!(shop.offer(ShopOfferRef::Voucher).is_none());
        assert!(shop.offer(ShopOfferRef::Joker(0)).is_none());
        assert!(shop.offer(ShopOfferRef::Joker(1)).is_some());
        assert!(shop.offer(ShopOfferRef::Pack(7)).is_none());
    }

    #[test]
    fn existing_modifiers_are_not_rerolled() {
        let odds = CardOdds {
            polychrome: 1.0,
            holographic: 0.0,
            foil: 0.0,
            seal: 1.0,
        };
        let mut rng = RngState::from_seed(1);
        let mut card = Card::standard(Suit::Hearts, Rank::Ace);
        card.edition = Some(Edition::Foil);
        card.seal = Some(Seal::Gold);
        roll_card_modifiers(&mut card, &odds, &mut rng);
        assert_eq!(card.edition, Some(Edition::Foil));
        assert_eq!(card.seal, Some(Seal::Gold));

        let mut plain = Card::standard(Suit::Hearts, Rank::Two);
        roll_card_modifiers(&mut plain, &odds, &mut rng);
        assert_eq!(plain.edition, Some(Edition::Polychrome));
        assert!(plain.seal.is_some());
    }
}
