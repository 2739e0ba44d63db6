/// A log of actions that can be undone and redone.
#[derive(Clone, Debug)]
pub struct Undo<T> {
    actions: Vec<T>,
    actions_performed: usize,
}

impl<T> Default for Undo<T> {
    fn default() -> Self {
        Self {
            actions: vec![],
            actions_performed: 0,
        }
    }
}

impl<T> Undo<T>
where
    T: PartialEq,
{
    pub fn new() -> Self {
        Default::default()
    }

    /// When an action is performed, record the action in a log so it can later be undone. If it
    /// differs from the action that would be redone next, the redo buffer is discarded.
    pub fn record(&mut self, action: T) {
        debug_assert!(self.actions_performed <= self.actions.len());
        if self.actions.len() <= self.actions_performed {
            self.actions.push(action);
        } else {
            if self.actions[self.actions_performed] != action {
                self.actions.truncate(self.actions_performed + 1);
            }

            self.actions[self.actions_performed] = action;
        }

        self.actions_performed += 1;
    }

    /// Get the most recent action from the log.
    pub fn undo(&mut self) -> Option<&T> {
        if self.actions_performed == 0 {
            return None;
        }
        self.actions_performed -= 1;
        self.actions.get(self.actions_performed)
    }

    /// Return the most recently undone action.
    pub fn redo(&mut self) -> Option<&T> {
        let result = self.actions.get(self.actions_performed);
        if result.is_some() {
            self.actions_performed += 1;
        }
        result
    }

    /// The actions that have been performed and not undone, oldest first.
    pub fn performed(&self) -> &[T] {
        &self.actions[..self.actions_performed]
    }

    pub fn clear(&mut self) {
        self.actions.clear();
        self.actions_performed = 0;
    }
}
