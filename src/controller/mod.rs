use crate::config::{normalize_placeholder, ListInputConfig};
use crate::filter::{filter_slice, significant_items};
use crate::focus::{focus_after_remove_item, focus_after_removals, FocusQuery, FocusTracker};
use crate::reconcile::{ListBinding, ListReconciler};
use crate::scheduler::Scheduler;
use serde_json::Value;
use std::cell::RefCell;
use std::ops::Range;
use std::rc::{Rc, Weak};

struct State {
    reconciler: ListReconciler,
    tracker: FocusTracker,
    custom_fields: bool,
    commit_delay_ms: u32,
    blur_expiry_ms: u32,
    focus_retry_ms: u32,
}

struct Shared {
    state: RefCell<State>,
    binding: Rc<dyn ListBinding>,
    focus: Rc<dyn FocusQuery>,
    scheduler: Rc<dyn Scheduler>,
}

/// Drives one list input: keeps the working list in sync with the caller's
/// source list, strips empty entries on commit and keeps keyboard focus on
/// the row the user meant.
///
/// Handles are cheap to clone. Deferred work only holds a weak reference, so
/// once every handle is dropped pending commits and focus retries do
/// nothing.
#[derive(Clone)]
pub struct ListInputController {
    shared: Rc<Shared>,
}

pub struct ListInputBuilder {
    binding: Rc<dyn ListBinding>,
    focus: Rc<dyn FocusQuery>,
    scheduler: Rc<dyn Scheduler>,
    config: ListInputConfig,
}

impl ListInputBuilder {
    pub fn config(mut self, config: &ListInputConfig) -> Self {
        self.config = config.clone();
        self
    }

    pub fn placeholder(mut self, placeholder: Value) -> Self {
        self.config.placeholder_value = normalize_placeholder(placeholder);
        self
    }

    pub fn custom_fields(mut self, custom_fields: bool) -> Self {
        self.config.custom_fields = custom_fields;
        self
    }

    /// Creates the controller and seeds it from the caller's current list.
    pub fn build(self, initial: &Value) -> ListInputController {
        let config = self.config;
        let state = State {
            reconciler: ListReconciler::new(config.placeholder_value),
            tracker: FocusTracker::default(),
            custom_fields: config.custom_fields,
            commit_delay_ms: config.commit_delay_ms,
            blur_expiry_ms: config.blur_expiry_ms,
            focus_retry_ms: config.focus_retry_ms,
        };

        let controller = ListInputController {
            shared: Rc::new(Shared {
                state: RefCell::new(state),
                binding: self.binding,
                focus: self.focus,
                scheduler: self.scheduler,
            }),
        };
        controller.initialize(initial);
        controller
    }
}

impl ListInputController {
    pub fn builder(
        binding: Rc<dyn ListBinding>,
        focus: Rc<dyn FocusQuery>,
        scheduler: Rc<dyn Scheduler>,
    ) -> ListInputBuilder {
        ListInputBuilder {
            binding,
            focus,
            scheduler,
            config: ListInputConfig::default(),
        }
    }

    fn weak(&self) -> Weak<Shared> {
        Rc::downgrade(&self.shared)
    }

    fn upgrade(weak: &Weak<Shared>) -> Option<Self> {
        weak.upgrade().map(|shared| Self { shared })
    }

    pub fn working_list(&self) -> Vec<Value> {
        self.shared.state.borrow().reconciler.working().to_vec()
    }

    pub fn items_range(&self) -> Range<usize> {
        self.shared.state.borrow().reconciler.items_range()
    }

    pub fn len(&self) -> usize {
        self.shared.state.borrow().reconciler.working().len()
    }

    /// Never true once built; the trailing slot is always there.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn item(&self, index: usize) -> Option<Value> {
        self.shared.state.borrow().reconciler.working().get(index).cloned()
    }

    pub fn placeholder_value(&self) -> Value {
        self.shared.state.borrow().reconciler.placeholder().clone()
    }

    pub fn custom_fields(&self) -> bool {
        self.shared.state.borrow().custom_fields
    }

    pub fn blurred_index(&self) -> Option<usize> {
        self.shared.state.borrow().tracker.blurred()
    }

    /// Whether row `index` should display its field's failed validation.
    /// The trailing new-item row never does.
    pub fn row_shows_error(&self, index: usize, valid: bool) -> bool {
        !valid && index + 1 < self.len()
    }

    /// Reconciles `candidate` and pushes the result outward. The state
    /// borrow is released before the binding is called.
    fn apply(&self, candidate: &[Value]) {
        let (source, working) = {
            let mut state = self.shared.state.borrow_mut();
            let reconciled = state.reconciler.reconcile(candidate);
            let working = reconciled
                .working_changed
                .then(|| state.reconciler.working().to_vec());
            (reconciled.source, working)
        };

        if let Some(working) = working {
            self.shared.binding.working_list_changed(&working);
        }
        self.shared.binding.assign(source);
    }

    /// Seeds the working list from the caller's list, dropping empty
    /// entries. Runs once from [`ListInputBuilder::build`].
    pub fn initialize(&self, initial: &Value) {
        let items = significant_items(initial, &self.placeholder_value());
        log::debug!("list input initialized with {} entries", items.len());
        self.apply(&items);
    }

    /// Reacts to the caller's list changing. Returns false when the change
    /// was ignored: our own write echoing back, or no list at all.
    pub fn on_external_list_changed(&self, incoming: &Value) -> bool {
        if incoming.is_null() {
            log::trace!("ignoring unset source list");
            return false;
        }

        let placeholder = {
            let state = self.shared.state.borrow();
            if state.reconciler.is_echo(incoming) {
                log::trace!("ignoring echo of written source list");
                return false;
            }
            state.reconciler.placeholder().clone()
        };

        let items = significant_items(incoming, &placeholder);
        log::debug!("source list replaced externally ({} entries)", items.len());
        self.apply(&items);
        true
    }

    /// Records a user edit of row `index`. Empty values stay until commit.
    pub fn set_item(&self, index: usize, value: Value) -> bool {
        self.update_item(index, move |item| *item = value)
    }

    /// Edits row `index` in place, e.g. one property of a structured entry.
    pub fn update_item(&self, index: usize, f: impl FnOnce(&mut Value)) -> bool {
        let mut next = self.working_list();
        let Some(item) = next.get_mut(index) else {
            return false;
        };
        f(item);
        self.apply(&next);
        true
    }

    pub fn set_placeholder_value(&self, placeholder: Value) {
        let placeholder = normalize_placeholder(placeholder);
        let (source, working) = {
            let mut state = self.shared.state.borrow_mut();
            if state.reconciler.placeholder() == &placeholder {
                return;
            }
            let reconciled = state.reconciler.set_placeholder(placeholder);
            let working = reconciled
                .working_changed
                .then(|| state.reconciler.working().to_vec());
            (reconciled.source, working)
        };

        if let Some(working) = working {
            self.shared.binding.working_list_changed(&working);
        }
        self.shared.binding.assign(source);
    }

    /// Schedules a commit after the configured delay, letting a native focus
    /// move (Tab / Shift+Tab) land before rows disappear.
    pub fn commit_edits(&self) {
        let delay = self.shared.state.borrow().commit_delay_ms;
        let weak = self.weak();
        self.shared.scheduler.schedule(
            delay,
            Box::new(move || {
                if let Some(controller) = Self::upgrade(&weak) {
                    controller.commit_edits_now();
                }
            }),
        );
    }

    /// Drops empty entries and moves focus up by one for every removed row
    /// above the focused one.
    pub fn commit_edits_now(&self) {
        // Read before the list shrinks.
        let focus_before = self.shared.focus.focused_index();

        let filtered = {
            let state = self.shared.state.borrow();
            filter_slice(state.reconciler.working(), state.reconciler.placeholder())
        };
        let focus_after = focus_after_removals(focus_before, &filtered.removed_indices);

        log::debug!(
            "commit removed rows {:?}, focus {:?} -> {:?}",
            filtered.removed_indices,
            focus_before,
            focus_after
        );

        self.apply(&filtered.items);

        if let Some(target) = focus_after.filter(|&after| Some(after) != focus_before) {
            self.focus_field_at_index(target);
        }
    }

    /// Deletes row `index` right away and returns focus to the row that had
    /// it just before, if any. Out-of-range indices are ignored.
    pub fn remove_item_at_index(&self, index: usize) -> bool {
        let Some(next) = self.shared.state.borrow().reconciler.without(index) else {
            return false;
        };
        self.apply(&next);

        let (blurred, len) = {
            let state = self.shared.state.borrow();
            (state.tracker.blurred(), state.reconciler.working().len())
        };
        let Some(blurred) = blurred else {
            return true;
        };

        let target = focus_after_remove_item(blurred, index, len);
        if blurred != index {
            self.shared.state.borrow_mut().tracker.clear();
        }
        log::debug!("removed row {index}, refocusing row {target}");
        self.focus_field_at_index(target);
        true
    }

    pub fn index_of_focused_field(&self) -> Option<usize> {
        self.shared.focus.focused_index()
    }

    /// Focuses row `index`, retrying once after a short delay when the row
    /// is not rendered yet.
    pub fn focus_field_at_index(&self, index: usize) {
        if self.shared.focus.focus(index) {
            return;
        }

        let delay = self.shared.state.borrow().focus_retry_ms;
        let weak = self.weak();
        self.shared.scheduler.schedule(
            delay,
            Box::new(move || {
                let Some(controller) = Self::upgrade(&weak) else {
                    return;
                };
                if index >= controller.len() {
                    log::debug!("row {index} no longer exists; not focusing");
                    return;
                }
                if !controller.shared.focus.focus(index) {
                    log::debug!("row {index} still not rendered; giving up focus");
                }
            }),
        );
    }

    /// Remembers that row `index` just lost focus, for a short while.
    pub fn record_blur(&self, index: usize) {
        let (generation, delay) = {
            let mut state = self.shared.state.borrow_mut();
            (state.tracker.record_blur(index), state.blur_expiry_ms)
        };

        let weak = self.weak();
        self.shared.scheduler.schedule(
            delay,
            Box::new(move || {
                if let Some(controller) = Self::upgrade(&weak) {
                    controller.shared.state.borrow_mut().tracker.expire(generation);
                }
            }),
        );
    }
}
