//!
//! A cheap approximation of the Gaussian power distribution `2^(-2 x^2)` used
//! as the sampler's filter kernel.
//!

/// Clip point of the approximation. Past this the kernel contribution is a
/// very small constant instead of a discontinuous zero; discontinuities have
/// a habit of making very ugly image outputs when they are crossed.
const X_LIMIT: f32 = 2.22726;

/// Where evaluation switches from the inner to the outer polynomial piece.
const X_CROSSOVER: f32 = 1.0;

const X_OFFSET_INNER: f32 = 0.5;
const X_OFFSET_OUTER: f32 = 1.5;

/// Approximates `2^(-2 x^2)` with a two-piece degree-7 polynomial.
///
/// The pieces are Taylor expansions centered at x = 0.5 and x = 1.5, giving
/// good accuracy out to about x = 2.23 with small slope at x = 0 and at the
/// clip point, which keeps sharp points and ringing artifacts out of the
/// rendered output. The function is reflected around x = 0, so it is exactly
/// even, and far cheaper than `powf`.
pub fn gaussian_power(x: f32) -> f32 {
    // Polynomial coefficients, inner piece
    const A7: f32 = 0.17400738865300;
    const A6: f32 = 0.19504045319711;
    const A5: f32 = -0.53683952080211;
    const A4: f32 = -0.15365608149925;
    const A3: f32 = 1.04494768376740;
    const A2: f32 = -0.30079497510241;
    const A1: f32 = -0.98025814346860;
    const A0: f32 = 0.70710678118658;
    // Outer piece
    const B7: f32 = 0.01900524221070;
    const B6: f32 = -0.09844647924079;
    const B5: f32 = 0.09968687365662;
    const B4: f32 = 0.06351206060550;
    const B3: f32 = -0.27504028874093;
    const B2: f32 = 0.32093189823918;
    const B1: f32 = -0.18379840190035;
    const B0: f32 = 0.04419417382416;

    let x_abs = x.abs();
    let x_clip = if x_abs > X_LIMIT { X_LIMIT } else { x_abs };

    // Horner's scheme; the crossover sits where the pieces agree.
    if x_clip < X_CROSSOVER {
        let x = x_clip - X_OFFSET_INNER;
        A0 + x * (A1 + x * (A2 + x * (A3 + x * (A4 + x * (A5 + x * (A6 + x * A7))))))
    } else {
        let x = x_clip - X_OFFSET_OUTER;
        B0 + x * (B1 + x * (B2 + x * (B3 + x * (B4 + x * (B5 + x * (B6 + x * B7))))))
    }
}
