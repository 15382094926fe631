// Float helpers that resolve to the native methods under `std` and to libm
// otherwise.

pub(crate) fn sin_cos(angle: f64) -> (f64, f64) {
    #[cfg(feature = "std")]
    return angle.sin_cos();

    #[cfg(not(feature = "std"))]
    return (libm::sin(angle), libm::cos(angle));
}

pub(crate) fn sqrt(x: f64) -> f64 {
    #[cfg(feature = "std")]
    return x.sqrt();

    #[cfg(not(feature = "std"))]
    return libm::sqrt(x);
}

pub(crate) fn sqrtf(x: f32) -> f32 {
    #[cfg(feature = "std")]
    return x.sqrt();

    #[cfg(not(feature = "std"))]
    return libm::sqrtf(x);
}

pub(crate) fn exp(x: f64) -> f64 {
    #[cfg(feature = "std")]
    return x.exp();

    #[cfg(not(feature = "std"))]
    return libm::exp(x);
}

pub(crate) fn acosf(x: f32) -> f32 {
    #[cfg(feature = "std")]
    return x.acos();

    #[cfg(not(feature = "std"))]
    return libm::acosf(x);
}

pub(crate) fn floor(x: f64) -> f64 {
    #[cfg(feature = "std")]
    return x.floor();

    #[cfg(not(feature = "std"))]
    return libm::floor(x);
}

pub(crate) fn log2(x: f64) -> f64 {
    #[cfg(feature = "std")]
    return x.log2();

    #[cfg(not(feature = "std"))]
    return libm::log2(x);
}

pub(crate) fn exp2(x: f64) -> f64 {
    #[cfg(feature = "std")]
    return x.exp2();

    #[cfg(not(feature = "std"))]
    return libm::exp2(x);
}
