//! Golden-fixture persistence: create-once, verify-on-rerun regression data.
//!
//! A fixture file holds the serialized input image(s), scalar parameters and
//! the output an implementation produced when the fixture was created. On
//! later runs the inputs are reloaded, the output is recomputed with the
//! current implementation, persisted again, and compared against the previous
//! output under a tolerance. Unlike the randomized equivalence tests this
//! catches drift across code changes or platforms, not just scalar-vs-vector
//! divergence.

use crate::compare::{compare, compare_value, Mismatch, Tolerance, ValueMismatch};
use crate::view::View;
use bincode::{Decode, Encode};
use pixel_simd_common::pixel_format::PixelFormat;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// One image serialized with its shape; rows are packed without stride
/// padding so fixture bytes are independent of the creating machine's
/// alignment choices.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct FixtureImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in rows.
    pub height: u32,
    /// [`PixelFormat`] discriminant.
    pub format: u8,
    /// Packed row data, `width * bytes_per_pixel * height` bytes.
    pub data: Vec<u8>,
}

impl FixtureImage {
    /// Packs a [`View`]'s visible pixels.
    pub fn from_view(view: &View) -> Self {
        let mut data = Vec::with_capacity(
            view.width() * view.format().bytes_per_pixel() * view.height(),
        );
        for y in 0..view.height() {
            data.extend_from_slice(view.row(y));
        }
        Self {
            width: view.width() as u32,
            height: view.height() as u32,
            format: view.format() as u8,
            data,
        }
    }

    /// Rebuilds an aligned [`View`] holding this image's pixels.
    ///
    /// Panics when the stored format byte is unknown (a corrupt fixture).
    pub fn to_view(&self) -> View {
        let format = match self.format {
            1 => PixelFormat::Gray8,
            3 => PixelFormat::Bgr24,
            4 => PixelFormat::Bgra32,
            other => panic!("fixture holds unknown pixel format {other}"),
        };
        let mut view = View::new(format, self.width as usize, self.height as usize);
        for y in 0..view.height() {
            let row_bytes = self.width as usize * format.bytes_per_pixel();
            view.row_mut(y)
                .copy_from_slice(&self.data[y * row_bytes..(y + 1) * row_bytes]);
        }
        view
    }
}

/// Named images and scalar values on one side of a fixture (inputs or
/// outputs).
#[derive(Debug, Clone, Default, PartialEq, Eq, Encode, Decode)]
pub struct FixtureSet {
    /// Named images.
    pub images: Vec<(String, FixtureImage)>,
    /// Named scalar results (e.g. difference sums).
    pub values: Vec<(String, i64)>,
}

impl FixtureSet {
    /// Adds `view` under `name`.
    pub fn put_image(&mut self, name: &str, view: &View) {
        self.images
            .push((name.to_owned(), FixtureImage::from_view(view)));
    }

    /// Looks up the image stored under `name`.
    pub fn image(&self, name: &str) -> Option<View> {
        self.images
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, image)| image.to_view())
    }

    /// Adds a scalar result under `name`.
    pub fn put_value(&mut self, name: &str, value: i64) {
        self.values.push((name.to_owned(), value));
    }

    /// Looks up the scalar result stored under `name`.
    pub fn value(&self, name: &str) -> Option<i64> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| *value)
    }
}

/// A complete persisted test case: what went in and what came out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Encode, Decode)]
pub struct Fixture {
    /// The inputs the kernel was run with.
    pub inputs: FixtureSet,
    /// The outputs the kernel produced at creation/last verification.
    pub outputs: FixtureSet,
}

/// Directory-backed fixture storage, one file per named case.
pub struct FixtureStore {
    root: PathBuf,
}

impl FixtureStore {
    /// Uses `root` as the fixture directory, creating it lazily on save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The file a case of this name persists to.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.fixture"))
    }

    /// Whether a fixture was already created for `name`.
    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).exists()
    }

    /// Serializes and persists `fixture`, replacing any previous file.
    pub fn save(&self, name: &str, fixture: &Fixture) -> Result<(), GoldenError> {
        fs::create_dir_all(&self.root)?;
        let bytes = bincode::encode_to_vec(fixture, bincode::config::standard())?;
        fs::write(self.path_for(name), bytes)?;
        Ok(())
    }

    /// Reloads the fixture persisted under `name`.
    pub fn load(&self, name: &str) -> Result<Fixture, GoldenError> {
        let bytes = fs::read(self.path_for(name))?;
        let (fixture, _) = bincode::decode_from_slice(&bytes, bincode::config::standard())?;
        Ok(fixture)
    }

    /// The directory this store reads and writes.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// A fixture store failure (I/O or serialization).
#[derive(Debug, Error)]
pub enum GoldenError {
    /// Reading or writing the fixture file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Serializing a fixture failed.
    #[error("fixture encoding failed: {0}")]
    Encode(#[from] bincode::error::EncodeError),
    /// Deserializing a fixture failed.
    #[error("fixture decoding failed: {0}")]
    Decode(#[from] bincode::error::DecodeError),
}

/// How [`golden_case`] completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoldenOutcome {
    /// First run: inputs and outputs were generated and persisted.
    Created,
    /// The recomputed outputs matched the persisted ones under tolerance.
    Verified,
}

/// Why [`golden_case`] failed.
#[derive(Debug, Error)]
pub enum GoldenFailure {
    /// The store itself failed.
    #[error("fixture store failure: {0}")]
    Store(#[from] GoldenError),
    /// A recomputed output image diverged beyond tolerance.
    #[error("output {name:?} diverged from the golden fixture: {mismatch}")]
    ImageMismatch {
        /// Name of the diverging output image.
        name: String,
        /// Where and by how much it diverged.
        mismatch: Mismatch,
    },
    /// A recomputed scalar output diverged.
    #[error("output value {name:?} diverged from the golden fixture: {mismatch}")]
    ValueMismatch {
        /// Name of the diverging output value.
        name: String,
        /// Expected and actual values.
        mismatch: ValueMismatch,
    },
    /// The fresh run no longer produces a persisted output.
    #[error("output {name:?} missing from the fresh run")]
    MissingOutput {
        /// Name of the missing output.
        name: String,
    },
}

/// Runs one golden test case.
///
/// On first run ("create"): builds inputs with `make_inputs`, runs `run` and
/// persists both. On later runs ("verify"): reloads the persisted inputs,
/// recomputes the outputs with the current implementation, persists the fresh
/// outputs, and compares fresh vs previous under `tolerance`.
pub fn golden_case<I, R>(
    store: &FixtureStore,
    name: &str,
    tolerance: &Tolerance,
    make_inputs: I,
    run: R,
) -> Result<GoldenOutcome, GoldenFailure>
where
    I: FnOnce() -> FixtureSet,
    R: Fn(&FixtureSet) -> FixtureSet,
{
    if !store.exists(name) {
        let inputs = make_inputs();
        let outputs = run(&inputs);
        store.save(name, &Fixture { inputs, outputs })?;
        return Ok(GoldenOutcome::Created);
    }

    let previous = store.load(name)?;
    let fresh = run(&previous.inputs);
    store.save(
        name,
        &Fixture {
            inputs: previous.inputs,
            outputs: fresh.clone(),
        },
    )?;

    for (output_name, old_image) in &previous.outputs.images {
        let new_view = fresh
            .image(output_name)
            .ok_or_else(|| GoldenFailure::MissingOutput {
                name: output_name.clone(),
            })?;
        if let Err(mismatch) = compare(&old_image.to_view(), &new_view, tolerance) {
            return Err(GoldenFailure::ImageMismatch {
                name: output_name.clone(),
                mismatch,
            });
        }
    }
    for (output_name, old_value) in &previous.outputs.values {
        let new_value = fresh
            .value(output_name)
            .ok_or_else(|| GoldenFailure::MissingOutput {
                name: output_name.clone(),
            })?;
        if let Err(mismatch) = compare_value(*old_value, new_value) {
            return Err(GoldenFailure::ValueMismatch {
                name: output_name.clone(),
                mismatch,
            });
        }
    }
    Ok(GoldenOutcome::Verified)
}
