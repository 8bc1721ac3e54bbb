//! Pairwise nearest neighbor (PNN) clustering of histogram bins.
//!
//! Starting from the histogram bins, this repeatedly merges the pair of bins
//! whose merge increases the total quantization error the least,
//! until only the requested number of bins remain.
//!
//! The live bins form a doubly-linked chain over their indices in the bin array.
//! Each bin caches its cheapest forward merge partner and the cost of that merge,
//! and a binary min-heap orders the bins by that cached cost.
//! Cached costs are only refreshed when they reach the top of the heap and are found to be stale,
//! which avoids recomputing every bin's nearest neighbor after each merge.

// Referenced paper:
// Pasi Fränti, Timo Kaukoranta, Ding-Fang Shen, Kuo-Shen Chang,
// Fast and memory efficient implementation of the exact PNN,
// IEEE Transactions on Image Processing, vol. 9, no. 5, 773–777, 2000.

use crate::{
    blue_noise::blue_noise,
    color::{sqr, LUMA_CHROMA},
    context::{ChannelWeights, QuantizeContext},
    histogram::Bin,
};

/// The merge time marking a bin that was absorbed into another bin.
pub(crate) const DELETED: u32 = u32::MAX;

/// The function applied to bin counts before clustering.
///
/// Damping the counts keeps very common colors (e.g., a background)
/// from dominating the merge costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CountScale {
    /// Counts are used as is.
    Identity,
    /// The truncated cube root.
    Cbrt,
    /// The square root rounded to single precision.
    SqrtF32,
    /// The truncated square root.
    SqrtTrunc,
}

impl CountScale {
    /// Selects the count rescaling for clustering `bin_count` bins down to `palette_size`.
    ///
    /// For a very small ratio of palette size to bins,
    /// this also switches `weights` to [`ChannelWeights::UNIFORM`].
    pub(crate) fn select(palette_size: u32, bin_count: usize, weights: &mut ChannelWeights) -> Self {
        let mut scale = if palette_size < 16 {
            Self::Cbrt
        } else if palette_size < 64 {
            Self::SqrtF32
        } else {
            Self::SqrtTrunc
        };

        #[allow(clippy::cast_precision_loss)]
        let weight = (f64::from(palette_size) / bin_count as f64).min(0.9);

        if weight > 0.003 && weight < 0.005 {
            scale = Self::Identity;
        }
        if weight < 0.04 && weights.green_at_least_luma() {
            *weights = ChannelWeights::UNIFORM;
            if palette_size >= 64 {
                scale = Self::Identity;
            }
        }

        scale
    }

    /// Rescales a single count.
    #[inline]
    pub(crate) fn apply(self, count: f64) -> f64 {
        match self {
            Self::Identity => count,
            Self::Cbrt => count.cbrt().trunc(),
            #[allow(clippy::cast_possible_truncation)]
            Self::SqrtF32 => f64::from(count.sqrt() as f32),
            Self::SqrtTrunc => count.sqrt().trunc(),
        }
    }
}

/// The parameters of the merge cost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct MergeMetric {
    /// The perceptual channel weights.
    weights: ChannelWeights,
    /// The blend between plain RGB and luma/chroma distance.
    ratio: f64,
    /// Whether alpha differences contribute to the cost.
    semi_transparency: bool,
}

impl From<&QuantizeContext> for MergeMetric {
    fn from(ctx: &QuantizeContext) -> Self {
        Self {
            weights: ctx.weights,
            ratio: ctx.ratio,
            semi_transparency: ctx.semi_transparency,
        }
    }
}

/// Iterates over the chain of live bins, starting at the bin with index `next`.
struct Chain<'a> {
    /// The bin array.
    bins: &'a [Bin],
    /// The index of the next bin to yield, or `0` once the chain ends.
    next: u32,
}

impl<'a> Iterator for Chain<'a> {
    type Item = (u32, &'a Bin);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.next == 0 {
            None
        } else {
            let i = self.next;
            let bin = &self.bins[i as usize];
            self.next = bin.fw;
            Some((i, bin))
        }
    }
}

/// Returns the live bins in chain order.
///
/// The chain always starts at bin `0`, since merges only ever absorb bins further along the chain.
pub(crate) fn live_bins(bins: &[Bin]) -> impl Iterator<Item = &Bin> {
    let head = bins.first();
    let rest = Chain { bins, next: head.map_or(0, |bin| bin.fw) };
    head.into_iter().chain(rest.map(|(_, bin)| bin))
}

/// A binary min-heap of bin indices ordered by each bin's cached merge cost.
///
/// Slot `0` is unused, so the children of slot `l` are `2l` and `2l + 1`.
#[derive(Debug, Clone)]
pub(crate) struct BinHeap {
    /// The heap slots (slot `0` is a placeholder).
    slots: Vec<u32>,
}

impl BinHeap {
    /// Creates an empty heap with room for `capacity` bins.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity + 1);
        slots.push(0);
        Self { slots }
    }

    /// The number of bins in the heap.
    pub(crate) fn len(&self) -> usize {
        self.slots.len() - 1
    }

    /// The bin with the least cached cost.
    pub(crate) fn root(&self) -> Option<u32> {
        self.slots.get(1).copied()
    }

    /// Inserts a bin, sifting it up to its place.
    pub(crate) fn push(&mut self, bins: &[Bin], idx: u32) {
        let err = bins[idx as usize].err;
        self.slots.push(idx);

        let mut l = self.len();
        while l > 1 {
            let parent = l >> 1;
            let h = self.slots[parent];
            if bins[h as usize].err <= err {
                break;
            }
            self.slots[l] = h;
            l = parent;
        }
        self.slots[l] = idx;
    }

    /// Moves the root down to its place after its cost changed.
    pub(crate) fn sift_down_root(&mut self, bins: &[Bin]) {
        let Some(b1) = self.root() else { return };
        let err = bins[b1 as usize].err;
        let n = self.len();

        let mut l = 1;
        loop {
            let mut l2 = l + l;
            if l2 > n {
                break;
            }
            if l2 < n && bins[self.slots[l2] as usize].err > bins[self.slots[l2 + 1] as usize].err {
                l2 += 1;
            }
            let h = self.slots[l2];
            if err <= bins[h as usize].err {
                break;
            }
            self.slots[l] = h;
            l = l2;
        }
        self.slots[l] = b1;
    }

    /// Replaces the root with the last bin and restores the heap order.
    pub(crate) fn remove_root(&mut self, bins: &[Bin]) {
        if let Some(last) = self.slots.pop() {
            if self.len() > 0 {
                self.slots[1] = last;
                self.sift_down_root(bins);
            }
        }
    }
}

/// Clusters bins by repeatedly merging the cheapest pair.
pub(crate) struct MergeEngine {
    /// The bin arena. Merged-away bins stay in place, marked as [`DELETED`].
    bins: Vec<Bin>,
    /// The bins ordered by cached merge cost.
    heap: BinHeap,
    /// The merge cost parameters.
    metric: MergeMetric,
    /// The number of merges done so far, used as the clock for `tm` and `mtm`.
    merges: u32,
}

impl MergeEngine {
    /// Chains and rescales the bins, then computes every bin's merge partner.
    pub(crate) fn new(mut bins: Vec<Bin>, scale: CountScale, metric: MergeMetric) -> Self {
        let n = bins.len();

        #[allow(clippy::cast_possible_truncation)]
        for j in 0..n {
            bins[j].count = scale.apply(bins[j].count);
            if j + 1 < n {
                bins[j].fw = (j + 1) as u32;
                bins[j + 1].bk = j as u32;
            }
        }

        let mut engine = Self {
            bins,
            heap: BinHeap::with_capacity(n),
            metric,
            merges: 0,
        };

        #[allow(clippy::cast_possible_truncation)]
        for i in 0..n {
            engine.find_nn(i);
            engine.heap.push(&engine.bins, i as u32);
        }

        engine
    }

    /// Finds the cheapest merge partner among the bins after `idx` in the chain.
    ///
    /// The cost is `n1 * n2 / (n1 + n2)` times the weighted squared distance,
    /// blending plain RGB with luma/chroma differences.
    /// Partial sums are compared against the best cost so far to skip hopeless candidates early.
    fn find_nn(&mut self, idx: usize) {
        let MergeMetric { weights: w, ratio, semi_transparency } = self.metric;
        let bin1 = self.bins[idx];
        let n1 = bin1.count;

        let start = if blue_noise(idx) > 0 {
            if w.green_at_least_luma() {
                1
            } else {
                LUMA_CHROMA.len()
            }
        } else {
            0
        };

        let mut err = f64::INFINITY;
        let mut nn = 0;

        'candidates: for (i, bin2) in (Chain { bins: &self.bins, next: bin1.fw }) {
            let n2 = bin2.count;
            let nerr2 = (n1 * n2) / (n1 + n2);
            if nerr2 >= err {
                continue;
            }

            let mut nerr = 0.0;
            if semi_transparency {
                nerr += nerr2 * w.a * sqr(bin2.a - bin1.a);
                if nerr >= err {
                    continue;
                }
            }

            let dr = bin2.r - bin1.r;
            let dg = bin2.g - bin1.g;
            let db = bin2.b - bin1.b;

            let plain = nerr2 * (1.0 - ratio);
            for (weight, diff) in [(w.r, dr), (w.g, dg), (w.b, db)] {
                nerr += plain * weight * sqr(diff);
                if nerr >= err {
                    continue 'candidates;
                }
            }

            let blended = nerr2 * ratio;
            for row in &LUMA_CHROMA[start..] {
                for (coeff, diff) in row.iter().zip([dr, dg, db]) {
                    nerr += blended * sqr(coeff * diff);
                    if nerr >= err {
                        continue 'candidates;
                    }
                }
            }

            err = nerr;
            nn = i;
        }

        let bin = &mut self.bins[idx];
        #[allow(clippy::cast_possible_truncation)]
        {
            bin.err = err as f32;
        }
        bin.nn = nn;
    }

    /// Pops stale heap entries until the root holds an up-to-date cost, and returns that bin.
    ///
    /// An entry is stale if its own bin was merged into after the cost was computed,
    /// or if its partner was merged into or deleted since then.
    /// Deleted bins are dropped from the heap, other stale entries are recomputed.
    /// Returns `None` once no bin has a merge partner left.
    pub(crate) fn next_pair(&mut self) -> Option<u32> {
        loop {
            let b1 = self.heap.root()?;
            let tb = self.bins[b1 as usize];

            if tb.tm >= tb.mtm && self.bins[tb.nn as usize].mtm <= tb.tm {
                return tb.err.is_finite().then_some(b1);
            }

            if tb.mtm == DELETED {
                self.heap.remove_root(&self.bins);
            } else {
                self.find_nn(b1 as usize);
                self.bins[b1 as usize].tm = self.merges;
                tracing::trace!(bin = b1, err = self.bins[b1 as usize].err, "refreshed merge cost");
                self.heap.sift_down_root(&self.bins);
            }
        }
    }

    /// Merges bin `b1` with its cached partner, which is unchained and marked as deleted.
    pub(crate) fn merge(&mut self, b1: u32) {
        let tb = self.bins[b1 as usize];
        let nb = self.bins[tb.nn as usize];

        let n1 = tb.count;
        let n2 = nb.count;
        #[allow(clippy::cast_possible_truncation)]
        let d = f64::from((1.0 / (n1 + n2)) as f32);

        self.merges += 1;

        let bin = &mut self.bins[b1 as usize];
        bin.a = d * (n1 * tb.a + n2 * nb.a).round();
        bin.r = d * (n1 * tb.r + n2 * nb.r).round();
        bin.g = d * (n1 * tb.g + n2 * nb.g).round();
        bin.b = d * (n1 * tb.b + n2 * nb.b).round();
        bin.count = n1 + n2;
        bin.mtm = self.merges;

        self.bins[nb.bk as usize].fw = nb.fw;
        self.bins[nb.fw as usize].bk = nb.bk;
        self.bins[tb.nn as usize].mtm = DELETED;
    }

    /// Merges bins until at most `target` remain, returning the bin array.
    pub(crate) fn run(mut self, target: usize) -> Vec<Bin> {
        let extra = self.bins.len().saturating_sub(target);

        for _ in 0..extra {
            match self.next_pair() {
                Some(b1) => self.merge(b1),
                None => break,
            }
        }

        tracing::debug!(merges = self.merges, remaining = self.bins.len() - self.merges as usize, "merged bins");

        self.bins
    }

    /// The bin arena.
    #[cfg(test)]
    pub(crate) fn bins(&self) -> &[Bin] {
        &self.bins
    }
}

/// Clusters the histogram `bins` down to the context's palette size.
///
/// This may switch the context's channel weights to uniform ones (see [`CountScale::select`]).
pub(crate) fn cluster(bins: Vec<Bin>, ctx: &mut QuantizeContext) -> Vec<Bin> {
    if bins.is_empty() {
        return bins;
    }

    let k = ctx.palette_size.into_inner();
    let scale = CountScale::select(k, bins.len(), &mut ctx.weights);
    tracing::debug!(bins = bins.len(), ?scale, weights = ?ctx.weights, "clustering histogram");

    MergeEngine::new(bins, scale, MergeMetric::from(&*ctx)).run(k as usize)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::{context::DEFAULT_ALPHA_THRESHOLD, histogram::Histogram, tests::*, PaletteSize};
    use ordered_float::OrderedFloat;
    use rand::{Rng, SeedableRng};
    use rand_xoshiro::Xoroshiro128PlusPlus;

    fn bin(r: f64, g: f64, b: f64, count: f64) -> Bin {
        Bin { a: 255.0, r, g, b, count, ..Bin::default() }
    }

    fn metric() -> MergeMetric {
        MergeMetric {
            weights: ChannelWeights::UNIFORM,
            ratio: 0.5,
            semi_transparency: false,
        }
    }

    fn context(pixels: &[u32], k: u32) -> QuantizeContext {
        QuantizeContext::new(pixels, PaletteSize::from_clamped(k), DEFAULT_ALPHA_THRESHOLD, 0.5)
    }

    fn assert_chain_consistent(bins: &[Bin], expected_len: usize) {
        let mut len = 1;
        let mut prev = 0;
        let mut i = bins[0].fw;
        while i != 0 {
            let bin = &bins[i as usize];
            assert_ne!(bin.mtm, DELETED);
            assert_eq!(bin.bk, prev);
            prev = i;
            i = bin.fw;
            len += 1;
        }
        assert_eq!(len, expected_len);
    }

    #[test]
    fn heap_pops_in_ascending_order() {
        let mut rng = Xoroshiro128PlusPlus::seed_from_u64(0);
        let bins = (0..500)
            .map(|_| Bin { err: rng.gen_range(0.0..1000.0), ..Bin::default() })
            .collect::<Vec<_>>();

        let mut heap = BinHeap::with_capacity(bins.len());
        for i in 0..500 {
            heap.push(&bins, i);
        }
        assert_eq!(heap.len(), 500);

        let mut popped = Vec::new();
        while let Some(root) = heap.root() {
            popped.push(bins[root as usize].err);
            heap.remove_root(&bins);
        }

        let mut expected = bins.iter().map(|bin| bin.err).collect::<Vec<_>>();
        expected.sort_by_key(|&err| OrderedFloat(err));
        assert_eq!(popped, expected);
    }

    #[test]
    fn count_scale_selection() {
        let mut weights = ChannelWeights::PERCEPTUAL;
        assert_eq!(CountScale::select(8, 100, &mut weights), CountScale::Cbrt);
        assert_eq!(CountScale::select(32, 100, &mut weights), CountScale::SqrtF32);
        assert_eq!(CountScale::select(256, 1000, &mut weights), CountScale::SqrtTrunc);
        assert_eq!(weights, ChannelWeights::PERCEPTUAL);

        // 256 / 64000 = 0.004
        assert_eq!(CountScale::select(256, 64000, &mut weights), CountScale::Identity);
        assert_eq!(weights, ChannelWeights::UNIFORM);

        let mut weights = ChannelWeights::PERCEPTUAL;
        assert_eq!(CountScale::select(128, 10000, &mut weights), CountScale::Identity);
        assert_eq!(weights, ChannelWeights::UNIFORM);

        let mut weights = ChannelWeights::PERCEPTUAL;
        assert_eq!(CountScale::select(48, 2000, &mut weights), CountScale::SqrtF32);
        assert_eq!(weights, ChannelWeights::UNIFORM);
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn count_scale_values() {
        assert_eq!(CountScale::Identity.apply(10.0), 10.0);
        assert_eq!(CountScale::Cbrt.apply(26.0), 2.0);
        assert_eq!(CountScale::Cbrt.apply(1.0), 1.0);
        assert_eq!(CountScale::SqrtTrunc.apply(99.0), 9.0);
        assert_eq!(CountScale::SqrtF32.apply(2.0), f64::from(2f32.sqrt()));
    }

    #[test]
    fn nearest_neighbor_is_the_closest_forward_bin() {
        let bins = vec![
            bin(0.0, 0.0, 0.0, 1.0),
            bin(200.0, 200.0, 200.0, 1.0),
            bin(10.0, 10.0, 10.0, 1.0),
            bin(210.0, 210.0, 210.0, 1.0),
        ];
        let engine = MergeEngine::new(bins, CountScale::Identity, metric());
        let bins = engine.bins();

        assert_eq!(bins[0].nn, 2);
        assert_eq!(bins[1].nn, 3);
        assert_eq!(bins[2].nn, 3);
        // the last bin has no forward candidates
        assert_eq!(bins[3].nn, 0);
        assert!(bins[3].err.is_infinite());
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn merge_takes_the_weighted_average() {
        let bins = vec![bin(0.0, 0.0, 0.0, 3.0), bin(100.0, 40.0, 8.0, 1.0)];
        let mut engine = MergeEngine::new(bins, CountScale::Identity, metric());

        let b1 = engine.next_pair();
        assert_eq!(b1, Some(0));
        engine.merge(0);

        let merged = engine.bins()[0];
        assert_eq!((merged.r, merged.g, merged.b, merged.count), (25.0, 10.0, 2.0, 4.0));
        assert_eq!(merged.fw, 0);
        assert_eq!(engine.bins()[1].mtm, DELETED);
        assert_eq!(engine.next_pair(), None);
    }

    #[test]
    fn reduces_to_target_with_consistent_chain() {
        let pixels = test_pixels_opaque(2048);
        for k in [3, 16, 64, 200] {
            let mut ctx = context(&pixels, k);
            let hist = Histogram::new(&pixels, &ctx);
            let n = hist.len();
            assert!(n > 200);

            let bins = cluster(hist.into_bins(), &mut ctx);
            assert_eq!(bins.len(), n);
            assert_chain_consistent(&bins, k as usize);
            assert_eq!(live_bins(&bins).count(), k as usize);
        }
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn merging_conserves_rescaled_mass() {
        let pixels = test_pixels_opaque(2048);
        let ctx = context(&pixels, 32);
        let hist = Histogram::new(&pixels, &ctx);

        let scale = CountScale::SqrtF32;
        let expected: f64 = hist.bins().iter().map(|bin| scale.apply(bin.count)).sum();

        let bins = MergeEngine::new(hist.into_bins(), scale, metric()).run(32);
        let actual: f64 = live_bins(&bins).map(|bin| bin.count).sum();
        assert!((expected - actual).abs() < 1e-6 * expected);
    }

    #[test]
    fn accepted_merge_is_the_cheapest_cached_cost() {
        let pixels = test_pixels_opaque(2048);
        let ctx = context(&pixels, 64);
        let hist = Histogram::new(&pixels, &ctx);
        let n = hist.len();

        let mut engine = MergeEngine::new(hist.into_bins(), CountScale::SqrtTrunc, metric());
        let mut total = 0.0;
        for _ in 0..(n - 64) {
            let b1 = engine.next_pair().unwrap();
            let cost = engine.bins()[b1 as usize].err;

            let cheapest = live_bins(engine.bins())
                .map(|bin| OrderedFloat(bin.err))
                .min()
                .unwrap();
            assert_eq!(OrderedFloat(cost), cheapest);

            assert!(cost >= 0.0);
            let new_total = total + f64::from(cost);
            assert!(new_total >= total);
            total = new_total;

            engine.merge(b1);
        }
        assert_chain_consistent(engine.bins(), 64);
    }

    #[test]
    fn clustering_is_deterministic() {
        let pixels = test_pixels_rgba(2048);
        let run = || {
            let mut ctx = context(&pixels, 48);
            let hist = Histogram::new(&pixels, &ctx);
            cluster(hist.into_bins(), &mut ctx)
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn empty_bins() {
        let mut ctx = context(&[], 16);
        assert!(cluster(Vec::new(), &mut ctx).is_empty());
        assert_eq!(live_bins(&[]).count(), 0);
    }
}
