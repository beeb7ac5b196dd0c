use backref::{Reference, Referenceable, relocate};
use pin_project_lite::pin_project;
use std::pin::{Pin, pin};

#[derive(Debug, Default)]
struct Button {
    id: u16,
    label: String,
}

pin_project! {
    /// A dialog whose default button is one of its own buttons.
    struct Dialog {
        #[pin]
        ok: Referenceable<Button>,
        #[pin]
        cancel: Referenceable<Button>,
        #[pin]
        default_button: Reference<Button>,
    }
}

impl Dialog {
    fn new() -> Self {
        Self {
            ok: Referenceable::new(Button {
                id: 1,
                label: "OK".into(),
            }),
            cancel: Referenceable::new(Button {
                id: 2,
                label: "Cancel".into(),
            }),
            default_button: Reference::null(),
        }
    }

    fn set_default(self: Pin<&mut Self>, id: u16) {
        let this = self.project();
        let target = [this.ok.into_ref(), this.cancel.into_ref()]
            .into_iter()
            .find(|button| button.id == id);
        this.default_button.attach_opt(target);
    }

    fn press_enter(&self) -> Option<u16> {
        unsafe { self.default_button.value() }.map(|button| button.id)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let mut dialog = pin!(Dialog::new());
    dialog.as_mut().set_default(2);
    log::info!("enter presses {:?}", dialog.press_enter());
    anyhow::ensure!(dialog.press_enter() == Some(2));

    {
        // Hand the cancel button over to a toolbar; the default follows it.
        relocate!(let toolbar_button = dialog.as_mut().project().cancel);
        log::info!("moved {}", toolbar_button.label);
        anyhow::ensure!(dialog.default_button.points_to(&toolbar_button));
        anyhow::ensure!(dialog.press_enter() == Some(2));
    }

    log::info!("enter presses {:?}", dialog.press_enter());
    anyhow::ensure!(dialog.press_enter().is_none());
    Ok(())
}
