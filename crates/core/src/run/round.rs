use super::*;
use crate::*;
use log::{info, warn};

impl RunState {
    /// Starts the first round of the run.
    pub fn start_round(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        self.ensure_phase(&[Phase::Setup])?;
        self.begin_round(events);
        Ok(())
    }

    /// Leaves the shop and starts the round it advanced to.
    pub fn start_next_round(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        self.ensure_phase(&[Phase::Shop])?;
        self.ensure_idle()?;
        self.begin_round(events);
        Ok(())
    }

    pub(super) fn begin_round(&mut self, events: &mut EventBus) {
        let limits = self.recompute_derived_limits();
        let returning = std::mem::take(&mut self.hand);
        self.deck.gather(returning, &mut self.rng);

        let ante = self.state.ante;
        let blind = self.state.blind;
        self.state.target = self.config.target_for(ante, blind);
        self.state.round_score = 0;
        self.state.hands_left = self.config.round.base_hands;
        self.state.discards_left = limits.discards;
        self.state.boss_debuff = None;
        if blind == BlindKind::Boss {
            self.state.boss_debuff = self.roll_boss_debuff();
        }
        self.shop = None;
        self.state.phase = Phase::Play;

        info!(
            "ante {} {:?} blind: target {}, {} hands, {} discards",
            ante, blind, self.state.target, self.state.hands_left, self.state.discards_left
        );
        events.push(Event::RoundStarted {
            ante,
            blind,
            target: self.state.target,
            hands: self.state.hands_left,
            discards: self.state.discards_left,
            debuffed_suit: self.state.debuffed_suit(),
        });
        self.draw_to_hand(events);
    }

    fn roll_boss_debuff(&mut self) -> Option<BossDebuff> {
        let Some(boss) = self.content.pick_boss(&mut self.rng) else {
            warn!("boss pool is empty; boss round has no debuff");
            return None;
        };
        let (boss_id, name) = (boss.id.clone(), boss.name.clone());
        let suit = match boss.effect {
            BossEffect::DebuffSuit => self
                .rng
                .index(Suit::ALL.len())
                .map_or(Suit::Spades, |idx| Suit::ALL[idx]),
        };
        info!("{name} debuffs {suit:?}");
        Some(BossDebuff {
            boss_id,
            name,
            suit,
        })
    }

    /// Pays out a won round and resolves end-of-round seals on held cards.
    pub(super) fn cash_out(&mut self, events: &mut EventBus) -> CashOut {
        let economy = &self.config.economy;
        let reward = self.config.reward_for(self.state.ante, self.state.blind);
        let interest = self.config.interest_for(self.state.money);
        let hand_bonus = self.state.hands_left as i64 * economy.per_hand_reward;
        let gold_seal_money = economy.gold_seal_money;

        let mut gold_seals = 0;
        let mut blue_seals = 0;
        for card in self.hand.iter_mut() {
            match card.seal {
                Some(Seal::Gold) => {
                    gold_seals += gold_seal_money;
                    card.seal = None;
                }
                Some(Seal::Blue) => {
                    blue_seals += 1;
                    card.seal = None;
                }
                _ => {}
            }
        }
        let mut planets = 0;
        for _ in 0..blue_seals {
            let Some(planet) = self.content.pick_planet(&mut self.rng) else {
                warn!("planet pool is empty; blue seal does nothing");
                continue;
            };
            let (id, hand) = (planet.id.clone(), planet.target_hand);
            self.level_up_hand(&id, hand, events);
            planets += 1;
        }

        let cash = CashOut {
            reward,
            interest,
            hand_bonus,
            gold_seals,
            planets,
        };
        self.state.money += cash.total();
        self.state.boss_debuff = None;
        self.state.phase = Phase::Cleared;
        info!(
            "round won with {}: +${} (money ${})",
            self.state.round_score,
            cash.total(),
            self.state.money
        );
        events.push(Event::RoundWon {
            score: self.state.round_score,
            reward,
            interest,
            hand_bonus,
            money: self.state.money,
        });
        cash
    }

    pub(super) fn lose_round(&mut self, events: &mut EventBus) {
        self.state.phase = Phase::GameOver;
        info!(
            "round lost: {} of {}",
            self.state.round_score, self.state.target
        );
        events.push(Event::RoundLost {
            score: self.state.round_score,
            target: self.state.target,
        });
    }
}
