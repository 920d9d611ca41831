//! Tray context menu.

use tray_icon::menu::{Menu, MenuItem, PredefinedMenuItem};

/// Keeps the menu items alive and their ids addressable for event dispatch.
pub struct MenuHandles {
    pub start: MenuItem,
    pub stop: MenuItem,
    pub pause: MenuItem,
    pub quit: MenuItem,
}

pub fn build() -> Result<(Menu, MenuHandles), tray_icon::menu::Error> {
    let start = MenuItem::new("Start Session", true, None);
    let stop = MenuItem::new("Stop Session", true, None);
    let pause = MenuItem::new("Start Pause", true, None);
    let quit = MenuItem::new("Quit", true, None);

    let menu = Menu::new();
    menu.append(&start)?;
    menu.append(&stop)?;
    menu.append(&pause)?;
    menu.append(&PredefinedMenuItem::separator())?;
    menu.append(&quit)?;

    Ok((
        menu,
        MenuHandles {
            start,
            stop,
            pause,
            quit,
        },
    ))
}
