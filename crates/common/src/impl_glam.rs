use glam::{DVec2, DVec3, DVec4, IVec2, IVec3, IVec4, Vec2, Vec3, Vec3A, Vec4};

/// Anything that can be read as an `N`-dimensional coordinate of `T`.
pub trait ToCoordinate<T, const N: usize> {
    fn to_coordinate(&self) -> [T; N];
}

impl<T: Copy, const N: usize> ToCoordinate<T, N> for [T; N] {
    #[inline]
    fn to_coordinate(&self) -> [T; N] {
        *self
    }
}

macro_rules! impl_glam_vector {
    ($($vec:ty => ($t:ty, $n:literal)),* $(,)?) => {$(
        impl ToCoordinate<$t, $n> for $vec {
            #[inline]
            fn to_coordinate(&self) -> [$t; $n] {
                self.to_array()
            }
        }
    )*};
}

impl_glam_vector!(
    Vec2 => (f32, 2),
    Vec3 => (f32, 3),
    Vec3A => (f32, 3),
    Vec4 => (f32, 4),
    DVec2 => (f64, 2),
    DVec3 => (f64, 3),
    DVec4 => (f64, 4),
    IVec2 => (i32, 2),
    IVec3 => (i32, 3),
    IVec4 => (i32, 4),
);
