use super::*;
use crate::*;
use log::{debug, info};

/// Owned copy of a shop offer, taken before payment.
enum Bought {
    Joker(JokerDef),
    Voucher(VoucherDef),
    Pack(PackDef),
}

impl RunState {
    /// Moves on to the next blind and opens a freshly generated shop.
    pub fn enter_shop(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        self.ensure_phase(&[Phase::Cleared])?;
        self.ensure_idle()?;
        self.state.advance_blind(self.config.round.max_ante);
        let owned = self.inventory.owned_joker_ids();
        let shop = ShopState::generate(
            &self.config.shop,
            &self.content,
            &mut self.rng,
            &owned,
            &self.state.purchased_vouchers,
        );
        let reroll_cost = shop.reroll_cost;
        self.shop = Some(shop);
        self.state.phase = Phase::Shop;
        info!(
            "shop open before ante {} {:?}",
            self.state.ante, self.state.blind
        );
        events.push(Event::ShopEntered { reroll_cost });
        Ok(())
    }

    /// Cost of the next reroll, accounting for an unused free reroll.
    pub fn reroll_price(&self) -> Option<i64> {
        let shop = self.shop.as_ref()?;
        if self.state.free_reroll && !shop.free_reroll_used {
            Some(0)
        } else {
            Some(shop.reroll_cost)
        }
    }

    pub fn reroll_shop(&mut self, events: &mut EventBus) -> Result<i64, RunError> {
        self.ensure_phase(&[Phase::Shop])?;
        self.ensure_idle()?;
        let cost = self
            .reroll_price()
            .ok_or(RunError::InvalidPhase(self.state.phase))?;
        self.ensure_funds(cost)?;

        let owned = self.inventory.owned_joker_ids();
        let shop = self
            .shop
            .as_mut()
            .ok_or(RunError::InvalidPhase(self.state.phase))?;
        if cost == 0 {
            shop.free_reroll_used = true;
        } else {
            self.state.money -= cost;
            shop.reroll_cost += self.config.shop.reroll_step;
        }
        shop.reroll(&self.config.shop, &self.content, &mut self.rng, &owned);
        debug!("shop rerolled for ${cost}, next ${}", shop.reroll_cost);
        events.push(Event::ShopRerolled {
            cost,
            money: self.state.money,
        });
        Ok(cost)
    }

    pub fn purchase_item(
        &mut self,
        offer: ShopOfferRef,
        events: &mut EventBus,
    ) -> Result<Purchase, RunError> {
        self.ensure_phase(&[Phase::Shop])?;
        self.ensure_idle()?;
        let shop = self
            .shop
            .as_ref()
            .ok_or(RunError::InvalidPhase(self.state.phase))?;
        let bought = match shop.offer(offer).ok_or(RunError::InvalidOffer)? {
            ShopOffer::Joker(def) => Bought::Joker(def.clone()),
            ShopOffer::Voucher(def) => Bought::Voucher(def.clone()),
            ShopOffer::Pack(def) => Bought::Pack(def.clone()),
        };
        let (id, cost) = match &bought {
            Bought::Joker(def) => (def.id.clone(), def.cost),
            Bought::Voucher(def) => (def.id.clone(), def.cost),
            Bought::Pack(def) => (def.id.clone(), def.cost),
        };
        self.ensure_funds(cost)?;
        match &bought {
            Bought::Joker(_) => self.ensure_joker_space()?,
            Bought::Voucher(def) => {
                if self.state.purchased_vouchers.contains(&def.id) {
                    return Err(RunError::VoucherOwned(def.id.clone()));
                }
            }
            Bought::Pack(def) => match def.kind {
                PackKind::Arcana => self.ensure_consumable_space()?,
                PackKind::Buffoon => self.ensure_joker_space()?,
                PackKind::Celestial | PackKind::Standard => {}
            },
        }

        self.state.money -= cost;
        if let Some(shop) = self.shop.as_mut() {
            shop.clear(offer);
        }
        let roster_change = match bought {
            Bought::Joker(def) => {
                let slot = self.inventory.add_joker(&def)?;
                RosterChange::JokerAdded { slot, id: def.id }
            }
            Bought::Voucher(def) => {
                self.state.purchased_vouchers.push(def.id.clone());
                self.recompute_derived_limits();
                RosterChange::VoucherAdded { id: def.id }
            }
            Bought::Pack(def) => self.open_pack(&def, events)?,
        };
        info!("bought {id} for ${cost} (money ${})", self.state.money);
        events.push(Event::ItemPurchased {
            offer,
            id,
            cost,
            money: self.state.money,
        });
        Ok(Purchase {
            offer,
            money_delta: -cost,
            roster_change,
        })
    }

    fn open_pack(&mut self, pack: &PackDef, events: &mut EventBus) -> Result<RosterChange, RunError> {
        let change = match pack.kind {
            PackKind::Celestial => {
                let picked = self
                    .content
                    .pick_planet(&mut self.rng)
                    .map(|planet| (planet.id.clone(), planet.target_hand));
                match picked {
                    Some((id, hand)) => {
                        let level = self.level_up_hand(&id, hand, events);
                        RosterChange::PlanetApplied { id, hand, level }
                    }
                    None => RosterChange::Nothing,
                }
            }
            PackKind::Arcana => match self.content.pick_tarot(&mut self.rng).map(|t| t.id.clone()) {
                Some(id) => {
                    self.inventory.add_consumable(id.clone())?;
                    events.push(Event::ConsumableGranted { id: id.clone() });
                    RosterChange::TarotAdded { id }
                }
                None => RosterChange::Nothing,
            },
            PackKind::Buffoon => {
                let owned = self.inventory.owned_joker_ids();
                match self.content.pick_joker(&owned, &mut self.rng).cloned() {
                    Some(def) => {
                        let slot = self.inventory.add_joker(&def)?;
                        RosterChange::JokerAdded { slot, id: def.id }
                    }
                    None => RosterChange::Nothing,
                }
            }
            PackKind::Standard => {
                let mut ids = Vec::with_capacity(pack.contains);
                for _ in 0..pack.contains {
                    let card = random_card(&self.config.odds, &mut self.rng);
                    ids.push(self.add_card_to_deck(card));
                }
                self.deck.shuffle(&mut self.rng);
                events.push(Event::CardsAdded { count: ids.len() });
                RosterChange::CardsAdded { ids }
            }
        };
        if change == RosterChange::Nothing {
            debug!("{} had nothing to give", pack.id);
        }
        Ok(change)
    }

    /// Sells the joker in `slot` for the fixed price, leaving the slot empty.
    pub fn sell_joker(&mut self, slot: usize, events: &mut EventBus) -> Result<i64, RunError> {
        self.ensure_phase(&[Phase::Play, Phase::Cleared, Phase::Shop])?;
        self.ensure_idle()?;
        let joker = self
            .inventory
            .remove_joker(slot)
            .map_err(|_| RunError::InvalidSlot(slot))?;
        let price = self.config.economy.joker_sell_price;
        self.state.money += price;
        info!("sold {} for ${price}", joker.id);
        events.push(Event::JokerSold {
            id: joker.id,
            price,
            money: self.state.money,
        });
        Ok(price)
    }

    fn ensure_joker_space(&self) -> Result<(), RunError> {
        if self.inventory.has_joker_space() {
            Ok(())
        } else {
            Err(RunError::SlotsFull(SlotKind::Joker))
        }
    }

    fn ensure_consumable_space(&self) -> Result<(), RunError> {
        if self.inventory.has_consumable_space() {
            Ok(())
        } else {
            Err(RunError::SlotsFull(SlotKind::Consumable))
        }
    }
}
