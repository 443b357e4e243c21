//! 角度单位
//!
//! 关节角统一以"度"存储和传递，只在构造变换矩阵时转换为弧度。
//! 使用 NewType 防止把裸 `f64`（长度、高度）误当作关节角传入。
//!
//! # 示例
//!
//! ```rust
//! use pickarm_kinematics::Deg;
//!
//! let a = Deg(30.0) + Deg(15.0);
//! assert_eq!(a, Deg(45.0));
//! assert!((Deg(180.0).to_radians() - std::f64::consts::PI).abs() < 1e-12);
//! ```

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// 角度（NewType）
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Deg(pub f64);

impl Deg {
    /// 转换为弧度
    #[inline]
    pub fn to_radians(self) -> f64 {
        self.0.to_radians()
    }

    /// 取绝对值
    #[inline]
    pub fn abs(self) -> Self {
        Deg(self.0.abs())
    }

    /// 限制范围
    #[inline]
    pub fn clamp(self, min: Self, max: Self) -> Self {
        Deg(self.0.clamp(min.0, max.0))
    }

    /// 是否为有限值（非 NaN、非无穷）
    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl fmt::Display for Deg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°", self.0)
    }
}

impl From<f64> for Deg {
    #[inline]
    fn from(value: f64) -> Self {
        Deg(value)
    }
}

impl Add for Deg {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Deg(self.0 + rhs.0)
    }
}

impl Sub for Deg {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Deg(self.0 - rhs.0)
    }
}

impl Mul<f64> for Deg {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Deg(self.0 * rhs)
    }
}

impl Neg for Deg {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Deg(-self.0)
    }
}

impl AddAssign for Deg {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Deg {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}
