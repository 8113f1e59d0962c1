// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host parameters grouped for loading from configuration files.

use alloc::vec::Vec;

use pallet_index::Tolerance;

use crate::error::{ArrayName, StackError};
use crate::footprint::ProductDims;
use crate::pattern::{PatternArrays, PatternSource};
use crate::scene::SceneFrame;
use crate::stack::BuildState;

/// Scalar parameters of the stack view.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "PascalCase"))]
pub struct StackParams {
    /// `ProductLength`.
    pub product_length: f64,
    /// `ProductWidth`.
    pub product_width: f64,
    /// `ProductHeight`.
    pub product_height: f64,
    /// Build counters and layer masks.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub build: BuildState,
    /// Pallet frame and slip sheets.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub frame: SceneFrame,
    /// Face contact tolerance.
    pub tolerance: f64,
}

impl Default for StackParams {
    fn default() -> Self {
        Self {
            product_length: 0.0,
            product_width: 0.0,
            product_height: 0.0,
            build: BuildState::default(),
            frame: SceneFrame::default(),
            tolerance: Tolerance::DEFAULT.get(),
        }
    }
}

impl StackParams {
    /// Validated product dimensions.
    pub fn dims(&self) -> Result<ProductDims, StackError> {
        ProductDims::new(self.product_length, self.product_width, self.product_height)
    }

    /// Contact tolerance.
    pub fn tolerance(&self) -> Tolerance {
        Tolerance(self.tolerance)
    }
}

/// Owned pattern arrays as stored by the host. Any array may be absent.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "PascalCase"))]
pub struct PatternData {
    /// `UnitX`.
    pub unit_x: Option<Vec<f32>>,
    /// `UnitY`.
    pub unit_y: Option<Vec<f32>>,
    /// `UnitR`.
    pub unit_r: Option<Vec<f32>>,
    /// `UnitFX`.
    #[cfg_attr(feature = "serde", serde(rename = "UnitFX"))]
    pub unit_fx: Option<Vec<f32>>,
    /// `UnitFY`.
    #[cfg_attr(feature = "serde", serde(rename = "UnitFY"))]
    pub unit_fy: Option<Vec<f32>>,
    /// `UnitFR`.
    #[cfg_attr(feature = "serde", serde(rename = "UnitFR"))]
    pub unit_fr: Option<Vec<f32>>,
    /// `Seq_UnitNum`.
    #[cfg_attr(feature = "serde", serde(rename = "Seq_UnitNum"))]
    pub seq_unit_num: Option<Vec<i32>>,
    /// `SeqF_UnitNum`.
    #[cfg_attr(feature = "serde", serde(rename = "SeqF_UnitNum"))]
    pub seqf_unit_num: Option<Vec<i32>>,
}

impl PatternData {
    /// Borrow the arrays as a [`PatternSource`].
    ///
    /// The normal triple is required. The flipped triple is used only when all three
    /// arrays are present.
    pub fn source(&self) -> Result<PatternSource<'_>, StackError> {
        fn need(a: &Option<Vec<f32>>, name: ArrayName) -> Result<&[f32], StackError> {
            a.as_deref().ok_or(StackError::Missing(name))
        }

        let normal = PatternArrays::new(
            need(&self.unit_x, ArrayName::UnitX)?,
            need(&self.unit_y, ArrayName::UnitY)?,
            need(&self.unit_r, ArrayName::UnitR)?,
        );
        let mut source = PatternSource::new(normal)
            .with_sequences(self.seq_unit_num.as_deref(), self.seqf_unit_num.as_deref());
        if let (Some(x), Some(y), Some(r)) = (&self.unit_fx, &self.unit_fy, &self.unit_fr) {
            source = source.with_flipped(PatternArrays::new(x, y, r));
        }
        Ok(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn missing_normal_array_is_reported() {
        let data = PatternData {
            unit_x: Some(vec![0.0, 1.0]),
            unit_r: Some(vec![0.0, 0.0]),
            ..PatternData::default()
        };
        assert_eq!(
            data.source().err(),
            Some(StackError::Missing(ArrayName::UnitY))
        );
    }

    #[test]
    fn incomplete_flipped_triple_is_ignored() {
        let data = PatternData {
            unit_x: Some(vec![0.0, 1.0]),
            unit_y: Some(vec![0.0, 1.0]),
            unit_r: Some(vec![0.0, 0.0]),
            unit_fx: Some(vec![0.0, 2.0]),
            ..PatternData::default()
        };
        let src = data.source().unwrap();
        assert!(src.flipped.is_none());
    }

    #[test]
    fn default_params_need_product_dimensions() {
        let params = StackParams::default();
        assert!(params.dims().is_err());
        assert_eq!(params.tolerance(), Tolerance::DEFAULT);
        assert!(params.build.top_sheet_placed);
    }
}
