use crate::commands::{CliError, PlaceCmd};
use garland::placement::{Job, MemoryHost, PlacementDriver};

use log::info;

// The element file registered with the in-memory host.
const ELEMENT: &str = "element";

/// Runs a placement job per curve against an in-memory document and prints the
/// resulting copies.
pub fn place(mut cmd: PlaceCmd) -> Result<(), CliError> {
    let driver = PlacementDriver::new();

    for (i, curve) in cmd.curves.drain(..).enumerate() {
        let mut host = MemoryHost::new();
        host.select(curve);
        host.add_element_file(ELEMENT, cmd.sampling.element_width);

        let job = Job::DEFAULT
            .with_trace(false)
            .with_element(ELEMENT)
            .with_sampling(cmd.sampling);

        let report = driver.run_job(&mut host, &job)?;
        info!("curve {}: {} calls to the host", i, host.calls().len());

        writeln!(&mut *cmd.output, "curve {}: placed {}", i, report.placed)?;
        for copy in host.duplicates() {
            writeln!(
                &mut *cmd.output,
                "  copy {} at {} {} rotated {}",
                copy.id.0, copy.position.x, copy.position.y, copy.rotation_degrees
            )?;
        }
    }

    Ok(())
}
