use crate::commands::{CliError, MeasureCmd};
use garland::path::Tangent;

pub fn measure(mut cmd: MeasureCmd) -> Result<(), CliError> {
    for (i, curve) in cmd.curves.iter().enumerate() {
        writeln!(
            &mut *cmd.output,
            "curve {}: length {} segments {}",
            i,
            curve.length(),
            curve.segments().len()
        )?;

        if let Some(distance) = cmd.at {
            let position = curve.position_at(distance);
            writeln!(&mut *cmd.output, "  position {} {}", position.x, position.y)?;
            match curve.tangent_at(distance) {
                Tangent::Defined(v) => writeln!(
                    &mut *cmd.output,
                    "  tangent {} {} ({}°)",
                    v.x,
                    v.y,
                    v.angle_from_x_axis().to_degrees()
                )?,
                Tangent::Undefined => writeln!(&mut *cmd.output, "  tangent undefined")?,
            }
        }
    }

    Ok(())
}
