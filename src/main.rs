#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

mod config;
mod engines;
mod form;
mod hover;
mod i18n;
mod images;
mod logging;
mod palette;
mod preferences;
mod reveal;
mod scroll;
mod skills;

#[cfg(target_arch = "wasm32")]
mod bridge;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod frontend;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("This project is frontend-only. Run `trunk serve` or `trunk build --release`.");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    frontend::run();
}
