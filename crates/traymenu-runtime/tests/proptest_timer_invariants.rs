//! Property-based invariant tests for [`TimerSlot`] and [`Observers`].
//!
//! 1. Polling in slices fires the same number of intervals as one big poll.
//! 2. A disarmed slot never fires, whatever time passes.
//! 3. Re-arming drops carried time.
//! 4. Observers see every emitted value, in registration order.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use proptest::prelude::*;
use traymenu_runtime::{Observers, TimerSlot};

fn slices_strategy() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(0u64..50, 0..64)
}

proptest! {
    #[test]
    fn sliced_polls_match_single_poll(interval_ms in 1u64..40, slices in slices_strategy()) {
        let interval = Duration::from_millis(interval_ms);
        let mut sliced = TimerSlot::new();
        sliced.arm(interval);
        let fired: u64 = slices
            .iter()
            .map(|&ms| u64::from(sliced.poll(Duration::from_millis(ms))))
            .sum();

        let total: u64 = slices.iter().sum();
        let mut whole = TimerSlot::new();
        whole.arm(interval);
        let expected = u64::from(whole.poll(Duration::from_millis(total)));

        prop_assert_eq!(fired, expected);
        prop_assert_eq!(expected, total / interval_ms);
    }

    #[test]
    fn disarmed_slot_never_fires(interval_ms in 1u64..40, slices in slices_strategy()) {
        let mut slot = TimerSlot::new();
        slot.arm(Duration::from_millis(interval_ms));
        slot.cancel();
        for ms in slices {
            prop_assert_eq!(slot.poll(Duration::from_millis(ms)), 0);
        }
        prop_assert!(!slot.is_armed());
    }

    #[test]
    fn rearm_discards_carry(interval_ms in 2u64..40) {
        let interval = Duration::from_millis(interval_ms);
        let mut slot = TimerSlot::new();
        slot.arm(interval);
        prop_assert_eq!(slot.poll(interval - Duration::from_millis(1)), 0);
        slot.arm(interval);
        prop_assert_eq!(slot.poll(Duration::from_millis(1)), 0);
        prop_assert_eq!(slot.generation(), 2);
    }

    #[test]
    fn observers_preserve_order(count in 1usize..8, values in prop::collection::vec(any::<u8>(), 0..16)) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut observers = Observers::new();
        for index in 0..count {
            let sink = Rc::clone(&log);
            observers.subscribe(move |v: &u8| sink.borrow_mut().push((index, *v)));
        }
        for v in &values {
            observers.emit(v);
        }
        let expected: Vec<(usize, u8)> = values
            .iter()
            .flat_map(|&v| (0..count).map(move |index| (index, v)))
            .collect();
        prop_assert_eq!(&*log.borrow(), &expected);
    }
}
