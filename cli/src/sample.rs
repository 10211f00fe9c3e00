use crate::commands::{CliError, SampleCmd};
use garland::algorithms::pattern::placements;

pub fn sample(mut cmd: SampleCmd) -> Result<(), CliError> {
    cmd.sampling.validate()?;

    for (i, curve) in cmd.curves.iter().enumerate() {
        let placements = placements(curve, &cmd.sampling)?;

        if cmd.count {
            writeln!(&mut *cmd.output, "curve {}: {} placements", i, placements.len())?;
            continue;
        }

        if cmd.curves.len() > 1 {
            writeln!(&mut *cmd.output, "# curve {}", i)?;
        }
        for placement in placements {
            writeln!(
                &mut *cmd.output,
                "{} {} {} {}",
                placement.distance, placement.position.x, placement.position.y, placement.rotation_degrees
            )?;
        }
    }

    Ok(())
}
