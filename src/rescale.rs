use ndarray::{Array2, ArrayView1, ArrayView2, ArrayViewMut1, Axis, Zip};
use tracing::{debug, warn};

use crate::error::{Result, SortingHatError};

// Which axis the min and max are reduced over.
// Axis 0 gives one min/max per column, axis 1 one per row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RescaleAxis {
    #[default]
    Columns,
    Rows,
}

impl RescaleAxis {
    pub fn index(self) -> usize {
        match self {
            RescaleAxis::Columns => 0,
            RescaleAxis::Rows => 1,
        }
    }
}

impl TryFrom<usize> for RescaleAxis {
    type Error = SortingHatError;

    fn try_from(axis: usize) -> Result<Self> {
        match axis {
            0 => Ok(RescaleAxis::Columns),
            1 => Ok(RescaleAxis::Rows),
            other => Err(SortingHatError::InvalidAxis(other)),
        }
    }
}

// Min-max rescale each slice of the matrix to [0, 1].
// A slice whose min equals its max divides by zero and comes out as NaN, as does
// any slice containing a NaN; use `rescale_checked` to get an error for the former.
pub fn rescale(matrix: ArrayView2<f64>, axis: RescaleAxis) -> Array2<f64> {
    let mut output = matrix.to_owned();
    // lanes(Axis(0)) walks the columns, which is exactly the axis-0 reduction
    Zip::from(output.lanes_mut(Axis(axis.index()))).par_for_each(rescale_lane);
    debug!(
        "Rescaled {}x{} matrix along axis {}",
        matrix.nrows(),
        matrix.ncols(),
        axis.index()
    );
    output
}

// Like `rescale`, but refuses any slice with zero range
pub fn rescale_checked(matrix: ArrayView2<f64>, axis: RescaleAxis) -> Result<Array2<f64>> {
    if let Some(index) = matrix
        .lanes(Axis(axis.index()))
        .into_iter()
        .position(|lane| range_of(lane).map_or(false, |(min, max)| max == min))
    {
        warn!("Slice {} along axis {} has zero range", index, axis.index());
        return Err(SortingHatError::ZeroRange {
            axis: axis.index(),
            index,
        });
    }
    Ok(rescale(matrix, axis))
}

fn rescale_lane(mut lane: ArrayViewMut1<f64>) {
    if let Some((min, max)) = range_of(lane.view()) {
        let span = max - min;
        lane.mapv_inplace(|value| (value - min) / span);
    }
}

// None for an empty lane. A NaN anywhere makes both ends NaN, so the whole
// lane rescales to NaN.
fn range_of(lane: ArrayView1<f64>) -> Option<(f64, f64)> {
    lane.iter().fold(None, |range, &value| match range {
        None => Some((value, value)),
        Some((min, _)) if min.is_nan() || value.is_nan() => Some((f64::NAN, f64::NAN)),
        Some((min, max)) => Some((f64::min(min, value), f64::max(max, value))),
    })
}
