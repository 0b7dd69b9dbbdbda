//! Connectors between independent source signals.
//!
//! Sometimes two signals describe the same thing but are owned by different
//! parts of a program. Connectors keep them in step with plain effects; the
//! connected signals can still be written independently.

use crate::reactive::{Effect, Identity, MaybeSignal, Signal};

/// Make `receiver` take the value of whichever transmitter changed last.
///
/// Each transmitter gets its own effect, so the receiver is written once per
/// transmitter change. On connection the receiver ends up holding the last
/// transmitter's value. Dispose the returned effects to disconnect.
pub fn receive<T, I, M>(receiver: &Signal<T>, transmitters: I) -> Vec<Effect>
where
    T: Clone + Identity + 'static,
    I: IntoIterator<Item = M>,
    M: Into<MaybeSignal<T>>,
{
    transmitters
        .into_iter()
        .map(|transmitter| {
            let (transmitter, receiver) = (transmitter.into(), receiver.clone());
            Effect::new(move || receiver.set(transmitter.value()))
        })
        .collect()
}

/// Broadcast every change of `transmitter` to all `receivers`.
///
/// Dispose the returned effect to disconnect.
pub fn transmit<T, I>(transmitter: impl Into<MaybeSignal<T>>, receivers: I) -> Effect
where
    T: Clone + Identity + 'static,
    I: IntoIterator<Item = Signal<T>>,
{
    let transmitter = transmitter.into();
    let receivers: Vec<Signal<T>> = receivers.into_iter().collect();
    Effect::new(move || {
        let current = transmitter.value();
        for receiver in &receivers {
            receiver.set(current.clone());
        }
    })
}
