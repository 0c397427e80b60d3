use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::deck::CardMask;
use crate::domain::hand::{HandRank, Street};
use crate::domain::player::{HandResult, Seat};
use crate::engine::actions::{Action, ActionRecord, RaiseSizing};
use crate::engine::betting::BettingRound;
use crate::engine::errors::EngineError;
use crate::engine::pot::Pot;
use crate::engine::validation::{validate_action, validate_spot};
use crate::engine::BoardSource;
use crate::eval::evaluate_best_hand;

/// Статус раздачи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum HandStatus {
    Ongoing,
    /// Указанное место сфолдило.
    Folded(Seat),
    /// Торговля закончилась без фолда – вскрытие.
    Showdown,
}

/// Снимок раздачи в точке решения.
///
/// Иммутабелен для ядра: `apply` возвращает новое состояние,
/// исходное не меняется. Инварианты:
/// - число карт борда соответствует улице;
/// - банк + оба стека постоянны на протяжении раздачи;
/// - ни одна карта не встречается дважды среди hole + board.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameState {
    street: Street,
    board: Vec<Card>,
    hole_cards: [Card; 2],
    pot: Pot,
    stacks: [Chips; 2],
    round: BettingRound,
    to_act: Seat,
    button: Seat,
    history: Vec<ActionRecord>,
    status: HandStatus,
}

/// Итог завершённой раздачи.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settlement {
    pub result: HandResult,
    /// Выплаты из банка по `Seat::index()`.
    pub payouts: [Chips; 2],
    /// Стеки после выплаты.
    pub final_stacks: [Chips; 2],
    /// Ранги рук на вскрытии (при фолде – `None`).
    pub bot_rank: Option<HandRank>,
    pub opponent_rank: Option<HandRank>,
}

impl Settlement {
    pub fn bot_stack(&self) -> Chips {
        self.final_stacks[Seat::Bot.index()]
    }
}

impl GameState {
    /// Точка решения бота, собранная внешним кодом.
    ///
    /// Улица выводится из числа карт борда. Ход – за ботом.
    /// `to_call` – сколько боту нужно доплатить; эти фишки соперника уже в `pot`.
    ///
    /// По умолчанию: на префлопе при `to_call > 0` бот – баттон (SB) и BB ещё
    /// не действовал; при `to_call == 0` бот – BB после лимпа. На постфлопе
    /// бот ходит первым (баттон у соперника), а ненулевая ставка означает,
    /// что соперник уже действовал. Уточнить можно через `with_button` /
    /// `with_history`.
    pub fn new(
        hole_cards: [Card; 2],
        board: Vec<Card>,
        pot: Chips,
        bot_stack: Chips,
        opponent_stack: Chips,
        to_call: Chips,
    ) -> Result<Self, EngineError> {
        let street = validate_spot(&hole_cards, &board, pot, to_call)?;

        let mut round = BettingRound::new(street);
        round.bets[Seat::Opponent.index()] = to_call;

        let button = match street {
            Street::Preflop if to_call.is_zero() => Seat::Opponent,
            Street::Preflop => Seat::Bot,
            _ => Seat::Opponent,
        };
        let opponent_acted = match street {
            Street::Preflop => to_call.is_zero(),
            _ => !to_call.is_zero(),
        };
        round.acted[Seat::Opponent.index()] = opponent_acted;

        Ok(Self {
            street,
            board,
            hole_cards,
            pot: Pot::new(pot),
            stacks: [bot_stack, opponent_stack],
            round,
            to_act: Seat::Bot,
            button,
            history: Vec::new(),
            status: HandStatus::Ongoing,
        })
    }

    /// Явно задать баттон (кто ходит первым на префлопе).
    pub fn with_button(mut self, button: Seat) -> Self {
        self.button = button;
        self
    }

    /// История текущей улицы. Записи других улиц отбрасываются;
    /// флаги «походил» и счётчик рейзов пересчитываются по истории.
    pub fn with_history(mut self, history: Vec<ActionRecord>) -> Self {
        let street = self.street;
        self.history = history.into_iter().filter(|r| r.street == street).collect();

        for record in &self.history {
            if record.seat != Seat::Bot {
                self.round.mark_acted(record.seat);
            }
            if record.action.is_aggressive() {
                self.round.raises = self.round.raises.saturating_add(1);
            }
        }
        self
    }

    pub fn street(&self) -> Street {
        self.street
    }

    pub fn board(&self) -> &[Card] {
        &self.board
    }

    pub fn hole_cards(&self) -> &[Card; 2] {
        &self.hole_cards
    }

    /// Все известные боту карты: hole + board.
    pub fn known_cards(&self) -> Vec<Card> {
        let mut known = Vec::with_capacity(2 + self.board.len());
        known.extend_from_slice(&self.hole_cards);
        known.extend_from_slice(&self.board);
        known
    }

    pub fn pot(&self) -> Chips {
        self.pot.total
    }

    pub fn stack(&self, seat: Seat) -> Chips {
        self.stacks[seat.index()]
    }

    pub fn bot_stack(&self) -> Chips {
        self.stack(Seat::Bot)
    }

    pub fn opponent_stack(&self) -> Chips {
        self.stack(Seat::Opponent)
    }

    /// Сколько нужно доплатить тому, чей ход.
    pub fn to_call(&self) -> Chips {
        self.round.to_call(self.to_act)
    }

    pub fn to_act(&self) -> Seat {
        self.to_act
    }

    pub fn button(&self) -> Seat {
        self.button
    }

    pub fn history(&self) -> &[ActionRecord] {
        &self.history
    }

    pub fn round(&self) -> &BettingRound {
        &self.round
    }

    pub fn status(&self) -> HandStatus {
        self.status
    }

    pub fn is_terminal(&self) -> bool {
        self.status != HandStatus::Ongoing
    }

    /// Всего фишек в игре (банк + стеки). Не меняется внутри раздачи.
    pub fn chips_in_play(&self) -> Chips {
        self.pot.total + self.stacks[0] + self.stacks[1]
    }

    /// Легальные действия текущего игрока.
    ///
    /// Fold и Call доступны всегда, пока раздача не закончена.
    /// Raise – только если стек больше ставки к уравниванию, соперник не в
    /// олл-ине и лимит рейзов на улице не исчерпан.
    pub fn legal_actions(&self, sizing: &RaiseSizing) -> Vec<Action> {
        if self.is_terminal() {
            return Vec::new();
        }

        let mut actions = vec![Action::Fold, Action::Call];

        let actor = self.to_act;
        let to_call = self.to_call();
        let stack = self.stack(actor);
        let other_stack = self.stack(actor.other());

        if stack > to_call
            && !other_stack.is_zero()
            && self.round.raises < sizing.max_raises_per_round
        {
            let cap = (stack - to_call).min(other_stack);
            actions.extend(
                sizing
                    .amounts(self.pot.total, to_call, cap)
                    .into_iter()
                    .map(Action::Raise),
            );
        }

        actions
    }

    /// Применить действие текущего игрока и получить новое состояние.
    ///
    /// Если улица закрывается, следующая порция борда берётся из `dealer`.
    /// Если после закрытия улицы кто-то в олл-ине – борд докладывается
    /// до ривера и раздача сразу уходит на вскрытие.
    pub fn apply<D: BoardSource + ?Sized>(
        &self,
        action: &Action,
        dealer: &mut D,
    ) -> Result<GameState, EngineError> {
        validate_action(self, action)?;

        let mut next = self.clone();
        let actor = next.to_act;
        let other = actor.other();
        next.history
            .push(ActionRecord::new(actor, next.street, *action));

        match *action {
            Action::Fold => {
                next.status = HandStatus::Folded(actor);
                return Ok(next);
            }

            Action::Call => {
                let to_call = next.round.to_call(actor);
                let pay = to_call.min(next.stacks[actor.index()]);
                next.commit(actor, pay);

                // Короткий колл: неуравненная часть возвращается ставившему.
                let uncalled = to_call - pay;
                if !uncalled.is_zero() {
                    next.round.bets[other.index()] -= uncalled;
                    next.stacks[other.index()] += uncalled;
                    next.pot.refund(uncalled);
                }
                next.round.mark_acted(actor);
            }

            Action::Raise(amount) => {
                let pay = next.round.to_call(actor) + amount;
                next.commit(actor, pay);
                next.round.on_raise(actor);
            }
        }

        if next.round.is_round_complete() {
            next.close_round(dealer)?;
        } else {
            next.to_act = other;
        }

        Ok(next)
    }

    /// Перенести фишки из стека в банк.
    fn commit(&mut self, seat: Seat, amount: Chips) {
        self.stacks[seat.index()] -= amount;
        self.round.bets[seat.index()] += amount;
        self.pot.add(amount);
    }

    /// Переход улицы / олл-ин ран-аут / шоудаун.
    fn close_round<D: BoardSource + ?Sized>(&mut self, dealer: &mut D) -> Result<(), EngineError> {
        let all_in = self.stacks.iter().any(|s| s.is_zero());

        while let Some(next_street) = self.street.next() {
            self.deal_street(next_street, dealer)?;
            if !all_in {
                self.round = BettingRound::new(next_street);
                self.history.clear();
                // На постфлопе первым ходит игрок без баттона.
                self.to_act = self.button.other();
                return Ok(());
            }
        }

        self.status = HandStatus::Showdown;
        Ok(())
    }

    /// Открыть карты следующей улицы.
    fn deal_street<D: BoardSource + ?Sized>(
        &mut self,
        street: Street,
        dealer: &mut D,
    ) -> Result<(), EngineError> {
        let count = street.cards_dealt();
        let cards = dealer.deal(self, count)?;
        if cards.len() != count {
            return Err(EngineError::Internal("источник борда выдал не то число карт"));
        }

        let mut seen = CardMask::from_cards(&self.known_cards());
        for &card in &cards {
            if !seen.insert(card) {
                return Err(EngineError::InvalidState(format!(
                    "карта {card} уже известна и не может быть сдана на борд"
                )));
            }
        }

        self.board.extend(cards);
        self.street = street;
        Ok(())
    }

    /// Расчёт завершённой раздачи против конкретных карт соперника.
    pub fn settle(&self, opponent_hole: &[Card; 2]) -> Result<Settlement, EngineError> {
        let (result, bot_rank, opponent_rank) = match self.status {
            HandStatus::Ongoing => return Err(EngineError::NotTerminal),
            HandStatus::Folded(seat) => (HandResult::from_winner(Some(seat.other())), None, None),
            HandStatus::Showdown => {
                if self.board.len() != Street::River.board_len() {
                    return Err(EngineError::Internal("вскрытие без полного борда"));
                }
                let bot = evaluate_best_hand(&self.hole_cards, &self.board)?;
                let opp = evaluate_best_hand(opponent_hole, &self.board)?;
                let result = match bot.cmp(&opp) {
                    std::cmp::Ordering::Greater => HandResult::BotWins,
                    std::cmp::Ordering::Less => HandResult::OpponentWins,
                    std::cmp::Ordering::Equal => HandResult::Split,
                };
                (result, Some(bot), Some(opp))
            }
        };

        let payouts = match result.winner() {
            Some(seat) => {
                let mut p = [Chips::ZERO; 2];
                p[seat.index()] = self.pot.total;
                p
            }
            None => self.pot.split(self.button.other()),
        };

        let final_stacks = [
            self.stacks[0] + payouts[0],
            self.stacks[1] + payouts[1],
        ];

        Ok(Settlement {
            result,
            payouts,
            final_stacks,
            bot_rank,
            opponent_rank,
        })
    }
}
