//! Carousel view lifecycle: slides, auto-advance timer and keyboard bridge

use crate::carousel::Carousel;
use crate::keyboard::{FocusProvider, KeyboardBridge};
use crate::timer::{AutoAdvance, Clock, SystemClock};
use crate::types::NavIntent;
use eframe::egui;
use std::time::Duration;
use tracing::debug;

pub struct CarouselController<C: Clock = SystemClock> {
    carousel: Carousel,
    timer: AutoAdvance,
    keyboard: KeyboardBridge,
    clock: C,
    mounted: bool,
}

impl CarouselController<SystemClock> {
    pub fn new(carousel: Carousel, period: Duration) -> Self {
        Self::with_clock(carousel, period, SystemClock)
    }
}

impl<C: Clock> CarouselController<C> {
    pub fn with_clock(carousel: Carousel, period: Duration, clock: C) -> Self {
        Self {
            carousel,
            timer: AutoAdvance::new(period),
            keyboard: KeyboardBridge::default(),
            clock,
            mounted: false,
        }
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn carousel_mut(&mut self) -> &mut Carousel {
        &mut self.carousel
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    #[cfg(test)]
    pub fn is_timer_running(&self) -> bool {
        self.timer.is_running()
    }

    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.timer.start(self.clock.now());
        self.keyboard.attach();
        debug!(period_ms = self.timer.period().as_millis() as u64, "Carousel mounted");
    }

    /// Cancel the timer and detach the key listener. Idempotent.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.timer.stop();
        self.keyboard.detach();
        debug!("Carousel unmounted");
    }

    /// Manual navigation. The timer restarts from zero so a manual move never races a
    /// stale tick.
    pub fn navigate(&mut self, intent: NavIntent) {
        if !self.mounted {
            return;
        }
        self.timer.stop();
        match intent {
            NavIntent::Previous => self.carousel.scroll_prev(),
            NavIntent::Next => self.carousel.scroll_next(),
            NavIntent::GoTo(index) => {
                self.carousel.scroll_to(index);
            }
        }
        self.timer.start(self.clock.now());
    }

    pub fn poll_keyboard(&mut self, ctx: &egui::Context, focus: &impl FocusProvider) -> bool {
        match self.keyboard.poll(ctx, focus) {
            Some(intent) => {
                self.navigate(intent);
                true
            }
            None => false,
        }
    }

    /// Advance when the timer is due. Returns true if the slide changed.
    pub fn tick(&mut self) -> bool {
        let now = self.clock.now();
        if self.timer.poll(now) {
            self.carousel.scroll_next();
            self.timer.restart(now);
            true
        } else {
            false
        }
    }

    pub fn time_until_next(&self) -> Option<Duration> {
        self.timer.time_until_next(self.clock.now())
    }
}

impl<C: Clock> Drop for CarouselController<C> {
    fn drop(&mut self) {
        self.unmount();
    }
}
