// In: src/encryptor.rs

//! Orchestration: a sequence generator plus an ordered operation list.
//!
//! `encrypt` applies the operations forward, consuming the live generator as
//! it goes. `decrypt` first computes the exact total number of sequence
//! values the forward pass consumed (a pure function of image shape and
//! operation configuration), materializes one reverse replay cursor of that
//! length from the *reset* generator, then applies the operations in reverse
//! order against it. Both passes are synchronous and single-threaded; one
//! encryptor owns one generator, and parallel callers must use one instance
//! per image.

use std::time::Instant;

use crate::chaos::{ChaosMap, MapState};
use crate::error::KaosError;
use crate::ops::CipherOp;
use crate::sequence::{ChaosSystem, SequenceCursor, SequenceGenerator};
use crate::utils::ensure_non_empty;
use crate::Image;

//==================================================================================
// 1. The Chaos Encryptor
//==================================================================================

/// A reversible image cipher driven by a deterministic sequence generator.
#[derive(Debug)]
pub struct Encryptor {
    generator: SequenceGenerator,
    ops: Vec<CipherOp>,
}

impl Encryptor {
    /// Creates an encryptor around an existing generator.
    pub fn new(generator: SequenceGenerator) -> Self {
        Self {
            generator,
            ops: Vec::new(),
        }
    }

    /// Creates an encryptor with an empty chaos-backed generator; attach maps
    /// with [`add_chaos_map`](Self::add_chaos_map).
    pub fn with_chaos() -> Self {
        Self::new(SequenceGenerator::Chaos(ChaosSystem::new()))
    }

    /// Attaches a chaotic map to the underlying generator.
    ///
    /// Fails if the generator is random-backed, or if the initial state does
    /// not match the map's arity.
    pub fn add_chaos_map(&mut self, map: ChaosMap, initial: MapState) -> Result<(), KaosError> {
        match &mut self.generator {
            SequenceGenerator::Chaos(sys) => sys.add_mapping(map, initial),
            SequenceGenerator::Random(_) => Err(KaosError::InvalidConfig(
                "cannot attach a chaotic map to a random-backed generator".to_string(),
            )),
        }
    }

    /// Appends an operation to the pipeline. Order is load-bearing: decrypt
    /// executes the list in exactly reverse order.
    pub fn add_operation(&mut self, op: CipherOp) {
        self.ops.push(op);
    }

    /// Total sequence values one forward pass consumes for the given shape.
    pub fn total_cost(&self, shape: (usize, usize, usize)) -> usize {
        self.ops.iter().map(|op| op.cost(shape)).sum()
    }

    /// Encrypts a copy of `image`, advancing the live generator by exactly
    /// [`total_cost`](Self::total_cost) pulls. The generator is never reset
    /// mid-pass, so its state flows across operation boundaries.
    pub fn encrypt(&mut self, image: &Image) -> Result<Image, KaosError> {
        ensure_non_empty(image)?;
        let start = Instant::now();
        let shape = image.dim();
        let mut out = image.clone();
        let mut cursor = SequenceCursor::Live(&mut self.generator);
        for op in &self.ops {
            out = op.apply(out, &mut cursor, false)?;
        }
        log::debug!(
            "encrypt: shape {:?}, {} ops, {} sequence values, {:.2?}",
            shape,
            self.ops.len(),
            self.total_cost(shape),
            start.elapsed()
        );
        Ok(out)
    }

    /// Decrypts a copy of `image` by replaying the forward sequence backward
    /// through the reversed operation list.
    pub fn decrypt(&mut self, image: &Image) -> Result<Image, KaosError> {
        ensure_non_empty(image)?;
        let start = Instant::now();
        let shape = image.dim();
        // Shape is invariant across every operation, so the cipher image's
        // shape yields the same cost the forward pass incurred.
        let total = self.total_cost(shape);
        let mut cursor = self.generator.reverse_cursor(total);
        let mut out = image.clone();
        for op in self.ops.iter().rev() {
            out = op.apply(out, &mut cursor, true)?;
        }
        // The replay must drain exactly; anything left over means an
        // operation's cost and its actual pull count disagree.
        if let Some(left) = cursor.remaining() {
            if left != 0 {
                return Err(KaosError::InternalError(format!(
                    "reverse replay left {} of {} values unconsumed",
                    left, total
                )));
            }
        }
        log::debug!(
            "decrypt: shape {:?}, {} ops, {} sequence values, {:.2?}",
            shape,
            self.ops.len(),
            total,
            start.elapsed()
        );
        Ok(out)
    }
}

//==================================================================================
// 2. The Arnold Encryptor
//==================================================================================

/// A standalone whole-pixel permutation cipher: the integer Arnold cat map
/// applied `shuffle_times` rounds. Square images only; consumes no sequence
/// values and needs no generator.
#[derive(Debug, Clone, Copy)]
pub struct ArnoldEncryptor {
    a: i64,
    b: i64,
    shuffle_times: usize,
}

impl ArnoldEncryptor {
    pub fn new(a: i64, b: i64, shuffle_times: usize) -> Self {
        Self { a, b, shuffle_times }
    }

    fn check_shape(image: &Image) -> Result<i64, KaosError> {
        ensure_non_empty(image)?;
        let (h, w, _c) = image.dim();
        if h != w {
            return Err(KaosError::NonSquareImage { rows: h, cols: w });
        }
        Ok(h as i64)
    }

    /// Each round maps pixel `(i, j)` to `((i + b*j) mod n, (a*i + (a*b+1)*j) mod n)`.
    pub fn encrypt(&self, image: &Image) -> Result<Image, KaosError> {
        let n = Self::check_shape(image)?;
        let (_, _, c) = image.dim();
        let mut src = image.clone();
        for _ in 0..self.shuffle_times {
            let mut result = Image::zeros(src.dim());
            for i in 0..n {
                for j in 0..n {
                    let x = (i + self.b * j).rem_euclid(n);
                    let y = (self.a * i + (self.a * self.b + 1) * j).rem_euclid(n);
                    for ch in 0..c {
                        result[[x as usize, y as usize, ch]] = src[[i as usize, j as usize, ch]];
                    }
                }
            }
            src = result;
        }
        Ok(src)
    }

    /// Each round applies the inverse map
    /// `(i, j) -> (((a*b+1)*i - b*j) mod n, (-a*i + j) mod n)`.
    pub fn decrypt(&self, image: &Image) -> Result<Image, KaosError> {
        let n = Self::check_shape(image)?;
        let (_, _, c) = image.dim();
        let mut src = image.clone();
        for _ in 0..self.shuffle_times {
            let mut result = Image::zeros(src.dim());
            for i in 0..n {
                for j in 0..n {
                    let x = ((self.a * self.b + 1) * i - self.b * j).rem_euclid(n);
                    let y = (-self.a * i + j).rem_euclid(n);
                    for ch in 0..c {
                        result[[x as usize, y as usize, ch]] = src[[i as usize, j as usize, ch]];
                    }
                }
            }
            src = result;
        }
        Ok(src)
    }
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
