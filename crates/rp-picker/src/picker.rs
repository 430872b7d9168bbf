//! Spin orchestration — the slot picker itself

use std::cell::Cell;
use std::rc::Rc;

use futures_util::future::join_all;
use serde::{Deserialize, Serialize};

use crate::animator::{ReelAnimator, ReelPhase};
use crate::config::{ConfigError, PickerConfig};
use crate::rng::RandomSource;
use crate::selector::{draw_winners, shuffle};
use crate::strip::build_reel_content;
use crate::surface::{ReelSurface, TransitionDone};

/// Hook invoked at a fixed point of the picker's lifecycle
pub type Hook = Box<dyn FnMut()>;

/// Optional lifecycle hooks
#[derive(Default)]
pub struct PickerHooks {
    /// Right before a spin starts (after the name count check)
    pub on_spin_start: Option<Hook>,
    /// After every reel has settled
    pub on_spin_end: Option<Hook>,
    /// After the name list has been replaced
    pub on_name_list_changed: Option<Hook>,
}

impl PickerHooks {
    pub fn on_spin_start(mut self, hook: impl FnMut() + 'static) -> Self {
        self.on_spin_start = Some(Box::new(hook));
        self
    }

    pub fn on_spin_end(mut self, hook: impl FnMut() + 'static) -> Self {
        self.on_spin_end = Some(Box::new(hook));
        self
    }

    pub fn on_name_list_changed(mut self, hook: impl FnMut() + 'static) -> Self {
        self.on_name_list_changed = Some(Box::new(hook));
        self
    }
}

impl std::fmt::Debug for PickerHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PickerHooks")
            .field("on_spin_start", &self.on_spin_start.is_some())
            .field("on_spin_end", &self.on_spin_end.is_some())
            .field("on_name_list_changed", &self.on_name_list_changed.is_some())
            .finish()
    }
}

fn fire(hook: &mut Option<Hook>) {
    if let Some(hook) = hook {
        hook();
    }
}

/// Reasons a spin does not run
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PickerError {
    #[error("name list must have at least {required} names, got {available}")]
    InsufficientNames { required: usize, available: usize },

    #[error("a spin is already in progress")]
    SpinInProgress,
}

/// Outcome of a completed spin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinReport {
    /// One winner per reel, in reel order (including reels without a surface)
    pub winners: Vec<String>,
    /// Name list after winner removal
    pub remaining: Vec<String>,
}

/// Keeps the picker busy while the spin it was issued for is alive
///
/// Dropping the ticket of the active spin frees the picker, so a spin that is
/// abandoned mid-animation does not block later ones.
struct SpinTicket {
    active: Rc<Cell<Option<u64>>>,
    id: u64,
}

impl SpinTicket {
    fn is_current(&self) -> bool {
        self.active.get() == Some(self.id)
    }
}

impl Drop for SpinTicket {
    fn drop(&mut self) {
        if self.is_current() {
            self.active.set(None);
        }
    }
}

/// A spin whose reels are animating
///
/// Produced by [`SlotPicker::begin_spin`]; every synchronous step (draw,
/// mounting, winner removal) has already happened. Dropping it abandons the
/// spin: the picker is free again and the next spin starts from empty reels.
#[must_use = "a pending spin must be awaited and handed to finish_spin"]
pub struct PendingSpin {
    report: SpinReport,
    completions: Vec<TransitionDone>,
    ticket: SpinTicket,
}

impl PendingSpin {
    pub fn report(&self) -> &SpinReport {
        &self.report
    }

    /// Number of reels actually animating
    pub fn reel_count(&self) -> usize {
        self.completions.len()
    }

    /// Wait until every reel's transition has completed
    pub async fn wait(self) -> CompletedSpin {
        let PendingSpin {
            report,
            completions,
            ticket,
        } = self;

        join_all(completions).await;
        CompletedSpin { report, ticket }
    }
}

impl std::fmt::Debug for PendingSpin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingSpin")
            .field("report", &self.report)
            .field("reels", &self.completions.len())
            .finish()
    }
}

/// A spin whose transitions have all completed
///
/// Only [`PendingSpin::wait`] produces one, and only
/// [`SlotPicker::finish_spin`] consumes it.
#[must_use = "a completed spin must be handed to finish_spin"]
pub struct CompletedSpin {
    report: SpinReport,
    ticket: SpinTicket,
}

impl CompletedSpin {
    pub fn report(&self) -> &SpinReport {
        &self.report
    }
}

impl std::fmt::Debug for CompletedSpin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletedSpin")
            .field("report", &self.report)
            .field("current", &self.ticket.is_current())
            .finish()
    }
}

/// Slot-machine style random name picker
///
/// Owns the name list and one [`ReelAnimator`] per resolvable reel surface.
/// Single-threaded: transitions run concurrently on the host, the picker only
/// awaits them together.
pub struct SlotPicker<S: ReelSurface> {
    config: PickerConfig,
    names: Vec<String>,
    reels: Vec<Option<ReelAnimator<S>>>,
    rng: Box<dyn RandomSource>,
    hooks: PickerHooks,
    active_spin: Rc<Cell<Option<u64>>>,
    next_spin_id: u64,
}

impl<S: ReelSurface> SlotPicker<S> {
    /// Create a picker, resolving each reel surface by its selector
    ///
    /// `resolve` is called with `"{selector}-{i}"` for `i` in
    /// `1..=number_of_slots`. Reels it cannot resolve are skipped on every
    /// spin.
    pub fn new(
        config: PickerConfig,
        hooks: PickerHooks,
        rng: impl RandomSource + 'static,
        mut resolve: impl FnMut(&str) -> Option<S>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let reels: Vec<Option<ReelAnimator<S>>> = config
            .reel_selectors()
            .iter()
            .enumerate()
            .map(|(index, selector)| {
                let surface = resolve(selector.as_str());
                if surface.is_none() {
                    log::warn!(
                        "Reel surface '{}' not found, reel {} will be skipped",
                        selector,
                        index + 1
                    );
                }
                surface.map(|surface| ReelAnimator::new(index, surface))
            })
            .collect();

        Ok(Self {
            config,
            names: Vec::new(),
            reels,
            rng: Box::new(rng),
            hooks,
            active_spin: Rc::new(Cell::new(None)),
            next_spin_id: 0,
        })
    }

    // ═══════════════════════════════════════════════════════════════════════
    // NAME LIST
    // ═══════════════════════════════════════════════════════════════════════

    /// Replace the name list, clearing every reel
    ///
    /// A spin still in flight is detached: its reels are cleared and handing
    /// it to [`finish_spin`](Self::finish_spin) later has no effect.
    pub fn set_names(&mut self, names: Vec<String>) {
        self.names = names;
        self.active_spin.set(None);

        for reel in self.reels.iter_mut().flatten() {
            reel.reset();
        }

        fire(&mut self.hooks.on_name_list_changed);
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn remove_winner(&self) -> bool {
        self.config.remove_winner
    }

    pub fn set_remove_winner(&mut self, remove_winner: bool) {
        self.config.remove_winner = remove_winner;
    }

    // ═══════════════════════════════════════════════════════════════════════
    // REEL STATE
    // ═══════════════════════════════════════════════════════════════════════

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn number_of_slots(&self) -> usize {
        self.config.number_of_slots
    }

    /// Reel `index` (zero-based), `None` if its surface was not resolved
    pub fn reel(&self, index: usize) -> Option<&ReelAnimator<S>> {
        self.reels.get(index).and_then(Option::as_ref)
    }

    pub fn surface(&self, index: usize) -> Option<&S> {
        self.reel(index).map(ReelAnimator::surface)
    }

    pub fn had_previous_winner(&self, index: usize) -> bool {
        self.reel(index).is_some_and(ReelAnimator::had_previous_winner)
    }

    pub fn reel_phase(&self, index: usize) -> Option<ReelPhase> {
        self.reel(index).map(ReelAnimator::phase)
    }

    pub fn is_spinning(&self) -> bool {
        self.active_spin.get().is_some()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // SPIN
    // ═══════════════════════════════════════════════════════════════════════

    /// Spin every reel and wait for all of them to settle
    ///
    /// Returns `false` without touching any state when the name list is
    /// shorter than the reel count or another spin is still running.
    pub async fn spin(&mut self) -> bool {
        match self.try_spin().await {
            Ok(_) => true,
            Err(err @ PickerError::InsufficientNames { .. }) => {
                log::error!("{}. Cannot start spinning.", err);
                false
            }
            Err(err) => {
                log::warn!("{}", err);
                false
            }
        }
    }

    /// [`spin`](Self::spin) with the outcome or the reason it did not run
    pub async fn try_spin(&mut self) -> Result<SpinReport, PickerError> {
        let pending = self.begin_spin()?;
        let completed = pending.wait().await;
        Ok(self.finish_spin(completed))
    }

    /// Whether a spin could start right now
    pub fn check_spin(&self) -> Result<(), PickerError> {
        if self.is_spinning() {
            return Err(PickerError::SpinInProgress);
        }

        let slots = self.config.number_of_slots;
        if self.names.len() < slots {
            return Err(PickerError::InsufficientNames {
                required: slots,
                available: self.names.len(),
            });
        }

        Ok(())
    }

    /// Run every synchronous step of a spin and start all reel transitions
    ///
    /// Winners are already removed from the name list when this returns.
    /// Await [`PendingSpin::wait`] and then call [`finish_spin`](Self::finish_spin).
    pub fn begin_spin(&mut self) -> Result<PendingSpin, PickerError> {
        self.check_spin()?;
        let slots = self.config.number_of_slots;

        fire(&mut self.hooks.on_spin_start);

        let winners = draw_winners(&self.names, slots, self.rng.as_mut())?;
        let duration_ms = self.config.spin_duration_ms();
        let mut completions = Vec::with_capacity(slots);

        for (reel, winner) in self.reels.iter_mut().zip(&winners) {
            let Some(reel) = reel else {
                continue;
            };

            // Left mid-animation by an abandoned spin
            if reel.phase() == ReelPhase::Spinning {
                log::debug!("Reel {}: clearing abandoned spin", reel.index() + 1);
                reel.reset();
            }

            let permutation = shuffle(&self.names, self.rng.as_mut());
            let content = build_reel_content(
                permutation,
                self.config.max_reel_items,
                reel.had_previous_winner(),
                winner,
            );

            log::info!("Slot {} - Winner: {}", reel.index() + 1, winner);

            completions.push(reel.start(&content, duration_ms, &self.config.timing));
        }

        if self.config.remove_winner {
            for winner in &winners {
                if let Some(position) = self.names.iter().position(|name| name == winner) {
                    self.names.remove(position);
                }
            }
        }

        log::info!("All Winners: {:?}", winners);
        log::info!("Remaining: {:?}", self.names);

        let id = self.next_spin_id;
        self.next_spin_id = self.next_spin_id.wrapping_add(1);
        self.active_spin.set(Some(id));

        Ok(PendingSpin {
            report: SpinReport {
                winners,
                remaining: self.names.clone(),
            },
            completions,
            ticket: SpinTicket {
                active: Rc::clone(&self.active_spin),
                id,
            },
        })
    }

    /// Settle every reel on its winner and fire the spin-end hook
    ///
    /// A spin detached by [`set_names`](Self::set_names), or issued by
    /// another picker, leaves the reels untouched.
    pub fn finish_spin(&mut self, spin: CompletedSpin) -> SpinReport {
        let CompletedSpin { report, ticket } = spin;

        if !ticket.is_current() || !Rc::ptr_eq(&ticket.active, &self.active_spin) {
            log::warn!("Ignoring a spin that is no longer active");
            return report;
        }

        for reel in self.reels.iter_mut().flatten() {
            reel.settle();
        }

        self.active_spin.set(None);
        fire(&mut self.hooks.on_spin_end);
        report
    }
}

impl<S: ReelSurface + std::fmt::Debug> std::fmt::Debug for SlotPicker<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlotPicker")
            .field("config", &self.config)
            .field("names", &self.names)
            .field("reels", &self.reels)
            .field("hooks", &self.hooks)
            .field("spinning", &self.is_spinning())
            .finish_non_exhaustive()
    }
}
