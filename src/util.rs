/*
 * Copyright (c) Radzivon Bartoshyk. All rights reserved.
 *
 * Redistribution and use in source and binary forms, with or without modification,
 * are permitted provided that the following conditions are met:
 *
 * 1.  Redistributions of source code must retain the above copyright notice, this
 * list of conditions and the following disclaimer.
 *
 * 2.  Redistributions in binary form must reproduce the above copyright notice,
 * this list of conditions and the following disclaimer in the documentation
 * and/or other materials provided with the distribution.
 *
 * 3.  Neither the name of the copyright holder nor the names of its
 * contributors may be used to endorse or promote products derived from
 * this software without specific prior written permission.
 *
 * THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
use std::error::Error;

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
/// Shows size mismatching
pub struct MismatchedSize {
    pub expected: usize,
    pub received: usize,
}

/// Reason a blur context could not be constructed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// Some rect coordinate is NaN or infinite.
    NonFiniteRect,
    /// The content rect has zero or negative width or height.
    NonPositiveSize,
    /// Standard deviation is negative or not finite.
    InvalidSigma,
    /// Stride must be a multiple of 4.
    UnalignedStride(u32),
    /// Stride is shorter than a surface row.
    StrideTooSmall(MismatchedSize),
    /// Surface bounds, radii or box areas exceed what can be addressed.
    ExceedingPointerSize,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BlurError {
    /// Rejected at construction, the context never exists.
    InvalidGeometry(GeometryError),
    /// Rejected before anything is written, the buffer is left untouched.
    BufferTooSmall(MismatchedSize),
}

impl Error for BlurError {}

impl std::fmt::Display for GeometryError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            GeometryError::NonFiniteRect => f.write_str("Rect coordinates must be finite"),
            GeometryError::NonPositiveSize => {
                f.write_str("Rect width and height must be greater than zero")
            }
            GeometryError::InvalidSigma => {
                f.write_str("Standard deviation must be finite and non-negative")
            }
            GeometryError::UnalignedStride(stride) => f.write_fmt(format_args!(
                "Stride must be a multiple of 4, but received {stride}"
            )),
            GeometryError::StrideTooSmall(size) => f.write_fmt(format_args!(
                "Minimum stride must have size at least {} but it is {}",
                size.expected, size.received
            )),
            GeometryError::ExceedingPointerSize => {
                f.write_str("Surface bounds and blurring radius exceeds pointer capacity")
            }
        }
    }
}

impl std::fmt::Display for BlurError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            BlurError::InvalidGeometry(geometry) => {
                f.write_fmt(format_args!("Invalid blur geometry: {geometry}"))
            }
            BlurError::BufferTooSmall(size) => f.write_fmt(format_args!(
                "Surface buffer is too small: expected at least {}, received {}",
                size.expected, size.received
            )),
        }
    }
}

impl From<GeometryError> for BlurError {
    fn from(value: GeometryError) -> Self {
        BlurError::InvalidGeometry(value)
    }
}

pub(crate) fn check_surface_size(arr: &[u8], allocation_size: usize) -> Result<(), BlurError> {
    if arr.len() < allocation_size {
        return Err(BlurError::BufferTooSmall(MismatchedSize {
            expected: allocation_size,
            received: arr.len(),
        }));
    }
    Ok(())
}
