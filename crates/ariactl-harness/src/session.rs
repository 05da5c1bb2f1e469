#![forbid(unsafe_code)]

//! A reference page wiring all three controllers to one [`SimHost`].
//!
//! Layout:
//!
//! ```text
//! document
//! ├── app root            (inert while the dialog is open)
//! │   ├── opener button
//! │   ├── skip link       (dialog fallback focus target)
//! │   ├── shelf list      (items rendered per page)
//! │   └── carousel region
//! └── dialog surface      (focusable, holds N controls)
//! ```

use std::ops::Range;
use std::time::Duration;

use ariactl_core::{
    CarouselConfig, ConfigError, DialogConfig, ElementRef, KeyInput, PagedListConfig,
};
use ariactl_widgets::{CarouselController, ModalFocusController, PagedListController};
use tracing::debug;

use crate::sim_host::{DOCUMENT, SimHost};

/// Element references of the reference page.
#[derive(Debug, Clone)]
pub struct PageLayout {
    pub app_root: ElementRef,
    pub opener: ElementRef,
    pub skip_link: ElementRef,
    pub shelf_list: ElementRef,
    pub carousel_region: ElementRef,
    pub dialog_surface: ElementRef,
    pub dialog_controls: Vec<ElementRef>,
}

impl PageLayout {
    /// Build the layout into `host`.
    pub fn build(host: &SimHost, dialog_controls: usize) -> Self {
        let app_root = host.add(DOCUMENT, false);
        let opener = host.add(app_root, true);
        let skip_link = host.add(app_root, true);
        let shelf_list = host.add(app_root, false);
        let carousel_region = host.add(app_root, false);
        let dialog_surface = host.add(DOCUMENT, true);
        let dialog_controls = host.add_focusable(dialog_surface, dialog_controls);
        Self {
            app_root,
            opener,
            skip_link,
            shelf_list,
            carousel_region,
            dialog_surface,
            dialog_controls,
        }
    }
}

/// Options for [`Session::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub shelf: PagedListConfig,
    pub shelf_total: usize,
    pub carousel: CarouselConfig,
    pub slides: usize,
    pub dialog_controls: usize,
    pub dismiss_on_backdrop: bool,
    pub reduced_motion: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            shelf: PagedListConfig::default(),
            shelf_total: 18,
            carousel: CarouselConfig::default(),
            slides: 3,
            dialog_controls: 3,
            dismiss_on_backdrop: true,
            reduced_motion: false,
        }
    }
}

/// The reference page with live controllers.
#[derive(Debug)]
pub struct Session {
    pub host: SimHost,
    pub layout: PageLayout,
    pub shelf: PagedListController<SimHost, SimHost>,
    pub carousel: CarouselController<SimHost>,
    pub dialog: ModalFocusController<SimHost, SimHost>,
    rendered: Range<usize>,
}

impl Session {
    /// Build the page, mount every controller, and paint the first frame.
    pub fn new(opts: SessionOptions) -> Result<Self, ConfigError> {
        let host = SimHost::new().with_reduced_motion(opts.reduced_motion);
        let layout = PageLayout::build(&host, opts.dialog_controls);

        let shelf = PagedListController::new(opts.shelf, opts.shelf_total, host.clone(), host.clone());
        let rendered = shelf.visible_range();
        host.render_items(layout.shelf_list, rendered.clone());

        let carousel = CarouselController::new(opts.carousel, opts.slides, &host, host.clone());

        let dialog_config = DialogConfig::new(layout.dialog_surface, layout.app_root)
            .with_fallback_focus(layout.skip_link)
            .with_dismiss_on_backdrop(opts.dismiss_on_backdrop);
        let dialog = ModalFocusController::new(dialog_config, host.clone(), host.clone())?;

        debug!(?opts, "session mounted");
        Ok(Self {
            host,
            layout,
            shelf,
            carousel,
            dialog,
            rendered,
        })
    }

    /// Render the shelf window if it moved, then deliver pending paint callbacks.
    ///
    /// Returns whether a focus transfer ran.
    pub fn paint(&mut self) -> bool {
        let range = self.shelf.visible_range();
        if range != self.rendered {
            self.host.render_items(self.layout.shelf_list, range.clone());
            self.rendered = range;
        }
        if self.host.commit_paint().is_empty() {
            return false;
        }
        self.shelf.on_paint_commit()
    }

    /// Advance the clock, delivering carousel ticks. Returns the tick count.
    pub fn advance(&mut self, by: Duration) -> usize {
        let carousel = &mut self.carousel;
        self.host.advance(by, |_| carousel.tick()).len()
    }

    /// Tab press: the dialog trap first, host default order otherwise.
    pub fn tab(&mut self, shift: bool) -> Option<ElementRef> {
        if !self.dialog.handle_key(KeyInput::tab(shift)) {
            self.host.default_tab(shift);
        }
        self.host.focused()
    }

    /// Host preference change, forwarded to the carousel.
    pub fn set_reduced_motion(&mut self, on: bool) {
        self.host.set_reduced_motion(on);
        self.carousel.on_reduced_motion_change(on);
    }

    /// Focus the dialog opener the way a user click would.
    pub fn focus_opener(&self) -> bool {
        self.host.click_focus(self.layout.opener)
    }
}
