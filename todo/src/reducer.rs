//! Reducer logic for the todo list.
//!
//! Commands are validated, turned into events, and the events are applied to
//! state. Every command leaves exactly one event in `TodoState::last_event`,
//! which is how callers holding the store lock learn the outcome.

use crate::types::{MAX_LABEL_LEN, TodoAction, TodoError, TodoId, TodoItem, TodoState};
use std::sync::Arc;
use todo_core::{SmallVec, effect::Effect, environment::Clock, reducer::Reducer};

/// Environment dependencies for the todo reducer
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Clock for item timestamps
    pub clock: Arc<dyn Clock>,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

/// Reducer for the todo list
#[derive(Clone, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates the label of an `AddTodo` command
    fn validate_label(label: &str) -> Result<(), TodoError> {
        if label.trim().is_empty() {
            return Err(TodoError::EmptyLabel);
        }

        let len = label.chars().count();
        if len > MAX_LABEL_LEN {
            return Err(TodoError::LabelTooLong {
                len,
                max: MAX_LABEL_LEN,
            });
        }

        Ok(())
    }

    /// Checks that a replayed event fits the current state
    ///
    /// An added item must carry a fresh id (at least `next_id`) with room for
    /// a successor. Toggles and deletes must name an existing item.
    fn validate_event(state: &TodoState, event: &TodoAction) -> Result<(), TodoError> {
        match event {
            TodoAction::TodoAdded { item } => {
                let id = item.id.get();
                if id < state.next_id || id.checked_add(1).is_none() {
                    return Err(TodoError::IdUnavailable(item.id));
                }
                Ok(())
            }
            TodoAction::TodoToggled { item } if !state.exists(item.id) => {
                Err(TodoError::NotFound(item.id))
            }
            TodoAction::TodoDeleted { id, .. } if !state.exists(*id) => {
                Err(TodoError::NotFound(*id))
            }
            _ => Ok(()),
        }
    }

    /// Applies an event to state
    fn apply_event(state: &mut TodoState, event: &TodoAction) {
        match event {
            TodoAction::TodoAdded { item } => {
                state.next_id = state.next_id.max(item.id.get().saturating_add(1));
                state.items.push(item.clone());
                state.last_error = None;
            }
            TodoAction::TodoToggled { item } => {
                if let Some(existing) = state.items.iter_mut().find(|i| i.id == item.id) {
                    existing.done = item.done;
                }
                state.last_error = None;
            }
            TodoAction::TodoDeleted { id, .. } => {
                state.items.retain(|i| i.id != *id);
                state.last_error = None;
            }
            TodoAction::CommandRejected { error } => {
                state.last_error = Some(error.clone());
            }
            // Commands are not applied to state
            TodoAction::AddTodo { .. }
            | TodoAction::ToggleTodo { .. }
            | TodoAction::DeleteTodo { .. } => return,
        }

        state.last_event = Some(event.clone());
    }

    /// Turns a command into the event it produces
    fn handle_command(state: &TodoState, command: TodoAction, env: &TodoEnvironment) -> TodoAction {
        let outcome = match command {
            TodoAction::AddTodo { label, done } => Self::validate_label(&label).and_then(|()| {
                let id = TodoId::new(state.next_id);
                if state.next_id == u64::MAX {
                    return Err(TodoError::IdUnavailable(id));
                }
                let item = TodoItem::new(id, label, done, env.clock.now());
                Ok(TodoAction::TodoAdded { item })
            }),

            TodoAction::ToggleTodo { id } => state
                .get(id)
                .map(|existing| {
                    let mut item = existing.clone();
                    item.done = !item.done;
                    TodoAction::TodoToggled { item }
                })
                .ok_or(TodoError::NotFound(id)),

            TodoAction::DeleteTodo { id } => {
                if state.exists(id) {
                    Ok(TodoAction::TodoDeleted {
                        id,
                        remaining: state.count() - 1,
                    })
                } else {
                    Err(TodoError::NotFound(id))
                }
            }

            event => Ok(event),
        };

        outcome.unwrap_or_else(|error| TodoAction::CommandRejected { error })
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect; 4]> {
        let event = if action.is_command() {
            Self::handle_command(state, action, env)
        } else {
            match Self::validate_event(state, &action) {
                Ok(()) => action,
                Err(error) => TodoAction::CommandRejected { error },
            }
        };

        Self::apply_event(state, &event);

        SmallVec::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)] // Test code can use unwrap/panic
mod tests {
    use super::*;
    use todo_testing::{ReducerTest, assertions, test_clock};

    fn create_test_env() -> TodoEnvironment {
        TodoEnvironment::new(Arc::new(test_clock()))
    }

    fn add(label: &str) -> TodoAction {
        TodoAction::AddTodo {
            label: label.to_string(),
            done: false,
        }
    }

    #[test]
    fn test_add_todo_success() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(TodoState::new())
            .when_action(add("Buy milk"))
            .then_state(|state| {
                assert_eq!(state.count(), 1);
                let todo = state.get(TodoId::new(1)).unwrap();
                assert_eq!(todo.label, "Buy milk");
                assert!(!todo.done);
                assert_eq!(todo.created_at, Some(test_clock().now()));
                assert_eq!(state.next_id, 2);
                assert!(matches!(state.last_event, Some(TodoAction::TodoAdded { .. })));
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_add_todo_with_initial_status() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(TodoState::new())
            .when_action(TodoAction::AddTodo {
                label: "Already done".to_string(),
                done: true,
            })
            .then_state(|state| {
                assert!(state.get(TodoId::new(1)).unwrap().done);
            })
            .run();
    }

    #[test]
    fn test_add_todo_keeps_label_untrimmed() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(TodoState::new())
            .when_action(add("  padded  "))
            .then_state(|state| {
                assert_eq!(state.items[0].label, "  padded  ");
            })
            .run();
    }

    #[test]
    fn test_add_todo_empty_label() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(TodoState::new())
            .when_action(add("   "))
            .then_state(|state| {
                assert_eq!(state.count(), 0);
                assert_eq!(state.next_id, 1);
                assert_eq!(state.last_error, Some(TodoError::EmptyLabel));
                assert_eq!(
                    state.last_event,
                    Some(TodoAction::CommandRejected {
                        error: TodoError::EmptyLabel
                    })
                );
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_add_todo_label_too_long() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(TodoState::new())
            .when_action(add(&"x".repeat(MAX_LABEL_LEN + 1)))
            .then_state(|state| {
                assert_eq!(state.count(), 0);
                assert_eq!(
                    state.last_error,
                    Some(TodoError::LabelTooLong {
                        len: MAX_LABEL_LEN + 1,
                        max: MAX_LABEL_LEN
                    })
                );
            })
            .run();
    }

    #[test]
    fn test_label_limit_counts_characters() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(TodoState::new())
            .when_action(add(&"é".repeat(MAX_LABEL_LEN)))
            .then_state(|state| {
                assert_eq!(state.count(), 1);
                assert!(state.last_error.is_none());
            })
            .run();
    }

    #[test]
    fn test_toggle_todo_flips_done() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(TodoState::new())
            .given_actions([add("Buy milk")])
            .when_action(TodoAction::ToggleTodo { id: TodoId::new(1) })
            .then_state(|state| {
                assert!(state.get(TodoId::new(1)).unwrap().done);
                match &state.last_event {
                    Some(TodoAction::TodoToggled { item }) => assert!(item.done),
                    other => panic!("unexpected event: {other:?}"),
                }
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_toggle_twice_restores_done() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(TodoState::new())
            .given_actions([
                add("Buy milk"),
                TodoAction::ToggleTodo { id: TodoId::new(1) },
            ])
            .when_action(TodoAction::ToggleTodo { id: TodoId::new(1) })
            .then_state(|state| {
                assert!(!state.get(TodoId::new(1)).unwrap().done);
            })
            .run();
    }

    #[test]
    fn test_toggle_todo_not_found() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(TodoState::new())
            .given_actions([add("Buy milk")])
            .when_action(TodoAction::ToggleTodo { id: TodoId::new(42) })
            .then_state(|state| {
                assert_eq!(state.last_error, Some(TodoError::NotFound(TodoId::new(42))));
                assert!(!state.get(TodoId::new(1)).unwrap().done);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_delete_todo_reports_remaining() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(TodoState::new())
            .given_actions([add("one"), add("two"), add("three")])
            .when_action(TodoAction::DeleteTodo { id: TodoId::new(2) })
            .then_state(|state| {
                let ids: Vec<u64> = state.items.iter().map(|i| i.id.get()).collect();
                assert_eq!(ids, vec![1, 3]);
                assert_eq!(
                    state.last_event,
                    Some(TodoAction::TodoDeleted {
                        id: TodoId::new(2),
                        remaining: 2
                    })
                );
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_delete_todo_not_found() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(TodoState::new())
            .when_action(TodoAction::DeleteTodo { id: TodoId::new(1) })
            .then_state(|state| {
                assert_eq!(state.count(), 0);
                assert_eq!(state.last_error, Some(TodoError::NotFound(TodoId::new(1))));
            })
            .run();
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(TodoState::new())
            .given_actions([add("one"), TodoAction::DeleteTodo { id: TodoId::new(1) }])
            .when_action(add("two"))
            .then_state(|state| {
                assert_eq!(state.items[0].id, TodoId::new(2));
            })
            .run();
    }

    #[test]
    fn test_success_clears_last_error() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(TodoState::new())
            .given_actions([add("")])
            .when_action(add("fine"))
            .then_state(|state| {
                assert!(state.last_error.is_none());
            })
            .run();
    }

    #[test]
    fn test_seeded_state_continues_numbering() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(TodoState::with_seed(["seeded"], test_clock().now()))
            .when_action(add("next"))
            .then_state(|state| {
                assert_eq!(state.items[1].id, TodoId::new(2));
            })
            .run();
    }

    #[test]
    fn test_replayed_event_is_applied() {
        let item = TodoItem::new(TodoId::new(5), "imported".to_string(), false, test_clock().now());

        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(TodoState::new())
            .when_action(TodoAction::TodoAdded { item })
            .then_state(|state| {
                assert_eq!(state.count(), 1);
                assert_eq!(state.next_id, 6);
            })
            .run();
    }

    #[test]
    fn test_replayed_duplicate_id_is_rejected() {
        let duplicate = TodoItem::new(TodoId::new(1), "dup".to_string(), false, test_clock().now());

        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(TodoState::new())
            .given_actions([add("a"), TodoAction::TodoAdded { item: duplicate }])
            .when_action(TodoAction::ToggleTodo { id: TodoId::new(1) })
            .then_state(|state| {
                let ids: Vec<u64> = state.items.iter().map(|i| i.id.get()).collect();
                assert_eq!(ids, vec![1]);
                assert!(state.items[0].done);
                assert_eq!(state.items[0].label, "a");
            })
            .run();
    }

    #[test]
    fn test_replayed_zero_id_is_rejected() {
        let zero = TodoItem::new(TodoId::new(0), "zero".to_string(), false, test_clock().now());

        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(TodoState::new())
            .when_action(TodoAction::TodoAdded { item: zero })
            .then_state(|state| {
                assert_eq!(state.count(), 0);
                assert_eq!(state.next_id, 1);
                assert_eq!(state.last_error, Some(TodoError::IdUnavailable(TodoId::new(0))));
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_replayed_max_id_does_not_overflow() {
        let last = TodoItem::new(TodoId::new(u64::MAX), "last".to_string(), false, test_clock().now());
        let before = TodoItem::new(TodoId::new(u64::MAX - 1), "before".to_string(), false, test_clock().now());

        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(TodoState::new())
            .given_actions([
                TodoAction::TodoAdded { item: last },
                TodoAction::TodoAdded { item: before },
            ])
            .when_action(add("after"))
            .then_state(|state| {
                let ids: Vec<u64> = state.items.iter().map(|i| i.id.get()).collect();
                assert_eq!(ids, vec![u64::MAX - 1]);
                assert_eq!(state.next_id, u64::MAX);
                assert_eq!(
                    state.last_error,
                    Some(TodoError::IdUnavailable(TodoId::new(u64::MAX)))
                );
            })
            .run();
    }

    #[test]
    fn test_replayed_toggle_of_unknown_item_is_rejected() {
        let ghost = TodoItem::new(TodoId::new(7), "ghost".to_string(), true, test_clock().now());

        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(TodoState::new())
            .when_action(TodoAction::TodoToggled { item: ghost })
            .then_state(|state| {
                assert_eq!(state.last_error, Some(TodoError::NotFound(TodoId::new(7))));
            })
            .run();
    }

    #[test]
    fn test_buy_milk_walk_dog_scenario() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(TodoState::new())
            .given_actions([
                add("buy milk"),
                add("walk dog"),
                TodoAction::ToggleTodo { id: TodoId::new(1) },
            ])
            .when_action(TodoAction::DeleteTodo { id: TodoId::new(2) })
            .then_state(|state| {
                assert_eq!(state.count(), 1);
                let item = &state.items[0];
                assert_eq!(item.id, TodoId::new(1));
                assert_eq!(item.label, "buy milk");
                assert!(item.done);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }
}
