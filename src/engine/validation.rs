use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::deck::CardMask;
use crate::domain::hand::Street;
use crate::engine::actions::Action;
use crate::engine::errors::EngineError;
use crate::engine::game_state::GameState;

/// Проверка входных данных при создании `GameState` внешним кодом.
pub fn validate_spot(
    hole_cards: &[Card; 2],
    board: &[Card],
    pot: Chips,
    to_call: Chips,
) -> Result<Street, EngineError> {
    let street = Street::from_board_len(board.len()).ok_or_else(|| {
        EngineError::InvalidState(format!(
            "на борде {} карт, ожидается 0, 3, 4 или 5",
            board.len()
        ))
    })?;

    let mut seen = CardMask::EMPTY;
    for &card in hole_cards.iter().chain(board.iter()) {
        if !seen.insert(card) {
            return Err(EngineError::InvalidState(format!(
                "карта {card} встречается дважды"
            )));
        }
    }

    if to_call > pot {
        return Err(EngineError::InvalidState(format!(
            "ставка к уравниванию {to_call} больше банка {pot}"
        )));
    }

    Ok(street)
}

/// Проверка, может ли текущий игрок выполнить это действие.
pub fn validate_action(state: &GameState, action: &Action) -> Result<(), EngineError> {
    if state.is_terminal() {
        return Err(EngineError::HandFinished);
    }

    let actor = state.to_act();
    let stack = state.stack(actor);
    let to_call = state.to_call();

    match action {
        Action::Fold | Action::Call => Ok(()),

        Action::Raise(amount) => {
            if amount.is_zero() {
                return Err(EngineError::IllegalAction {
                    action: *action,
                    reason: "нулевой рейз",
                });
            }
            if stack <= to_call {
                return Err(EngineError::IllegalAction {
                    action: *action,
                    reason: "стек не превышает ставку к уравниванию",
                });
            }
            if state.stack(actor.other()).is_zero() {
                return Err(EngineError::IllegalAction {
                    action: *action,
                    reason: "соперник уже в олл-ине",
                });
            }
            if to_call + *amount > stack {
                return Err(EngineError::NotEnoughChips);
            }
            if *amount > state.stack(actor.other()) {
                return Err(EngineError::IllegalAction {
                    action: *action,
                    reason: "рейз больше эффективного стека соперника",
                });
            }
            Ok(())
        }
    }
}
