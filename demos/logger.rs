use backref::{Referenceable, reference, relocate};
use std::pin::pin;

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Trace)
        .init();
    let mut label = pin!(Referenceable::new(String::from("backref logger")));
    reference!(let r1 = label.as_ref());
    reference!(let r2 = copy r1);
    {
        relocate!(let moved = label.as_mut());
        anyhow::ensure!(r2.points_to(&moved), "reference did not follow");
    }
    anyhow::ensure!(r1.is_null() && r2.is_null(), "reference outlived its referent");
    Ok(())
}
