// bpoller/src/poller.rs

//! Event/callback bridge shared by every poller.
//!
//! The dispatch loop owns the schedule: it feeds `NfcEvent`s into `run`
//! and stops once a callback answers `Command::Stop`. Pollers turn each
//! step outcome into one `GenericEvent` for the registered callback.

use crate::types::{Command, NfcEvent, Protocol};

/// Event envelope delivered to a poller callback.
///
/// `instance` gives the callback full access to the poller that produced
/// the event, e.g. to exchange blocks once a session is ready.
pub struct GenericEvent<'a, P: ?Sized, E> {
    pub protocol: Protocol,
    pub event: E,
    pub instance: &'a mut P,
}

/// Boxed callback stored by a poller.
pub type PollerCallback<P, E> = Box<dyn FnMut(GenericEvent<'_, P, E>) -> Command>;

/// Common surface of the protocol pollers, driven by an external loop.
pub trait Poller: Sized {
    /// Protocol-specific event payload.
    type Event;
    /// Card data recovered by successful steps.
    type Data;

    const PROTOCOL: Protocol;

    /// Register the single event sink. Must happen before the first tick.
    fn set_callback<F>(&mut self, callback: F)
    where
        F: FnMut(GenericEvent<'_, Self, Self::Event>) -> Command + 'static;

    /// Advance the state machine by one step.
    fn run(&mut self, event: NfcEvent) -> Command;

    /// Probe the field for this protocol without changing poller state.
    fn detect(&mut self, event: NfcEvent) -> bool;

    /// Card data, `None` until a step has completed successfully.
    fn data(&self) -> Option<&Self::Data>;
}

/// Access to the callback slot of a poller, used by `notify`.
pub(crate) trait CallbackSlot: Poller {
    fn callback_slot(&mut self) -> &mut Option<PollerCallback<Self, Self::Event>>;
}

/// Call the registered callback with `event`, returning its command.
///
/// The callback is moved out of its slot while it runs so it can borrow the
/// poller mutably. Without a callback the step result has no consumer and
/// `Command::Stop` is returned.
pub(crate) fn notify<P: CallbackSlot>(instance: &mut P, event: P::Event) -> Command {
    let Some(mut callback) = instance.callback_slot().take() else {
        log::warn!("{}: no callback registered, stopping", P::PROTOCOL);
        return Command::Stop;
    };
    let command = callback(GenericEvent {
        protocol: P::PROTOCOL,
        event,
        instance: &mut *instance,
    });
    // A callback may have registered a replacement for itself
    let slot = instance.callback_slot();
    if slot.is_none() {
        *slot = Some(callback);
    }
    command
}

/// Minimal dispatch loop: tick `poller` with `PollerReady` until it answers
/// `Stop` or `max_ticks` is reached. Returns the number of ticks run.
pub fn run_until_stop<P: Poller>(poller: &mut P, max_ticks: usize) -> usize {
    for tick in 1..=max_ticks {
        if poller.run(NfcEvent::PollerReady) == Command::Stop {
            log::debug!("{}: stopped after {} ticks", P::PROTOCOL, tick);
            return tick;
        }
    }
    max_ticks
}
