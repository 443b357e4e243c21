//! 关节索引和数组
//!
//! 提供编译期安全的关节索引，防止越界和索引错误。
//!
//! # 示例
//!
//! ```rust
//! use pickarm_kinematics::{Deg, Joint, JointArray};
//!
//! let joints = JointArray::new([Deg(0.0), Deg(25.0), Deg(80.0), Deg(90.0)]);
//! assert_eq!(joints[Joint::Lower], Deg(25.0));
//!
//! for (joint, angle) in Joint::ALL.iter().zip(joints.iter()) {
//!     println!("{}: {}", joint, angle);
//! }
//! ```

use crate::units::Deg;
use std::fmt;
use std::ops::{Index, IndexMut};

/// 关节枚举
///
/// 机械臂的 4 个关节，顺序与运动链一致（从基座到腕部）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Joint {
    /// 基座偏航（绕 Y 轴）
    Base = 0,
    /// 下臂俯仰（绕 Z 轴）
    Lower = 1,
    /// 上臂俯仰（绕 Z 轴）
    Upper = 2,
    /// 腕部旋转（绕 Y 轴，不影响末端高度）
    Wrist = 3,
}

impl Joint {
    /// 所有关节的数组
    pub const ALL: [Joint; 4] = [Joint::Base, Joint::Lower, Joint::Upper, Joint::Wrist];

    /// 获取关节索引（0-3）
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// 从索引创建关节（范围检查）
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Joint::Base),
            1 => Some(Joint::Lower),
            2 => Some(Joint::Upper),
            3 => Some(Joint::Wrist),
            _ => None,
        }
    }

    /// 获取关节名称
    pub const fn name(self) -> &'static str {
        match self {
            Joint::Base => "base",
            Joint::Lower => "lower",
            Joint::Upper => "upper",
            Joint::Wrist => "wrist",
        }
    }

    /// 是否为俯仰关节（会改变末端高度，受地面安全门约束）
    #[inline]
    pub const fn is_pitch(self) -> bool {
        matches!(self, Joint::Lower | Joint::Upper)
    }
}

impl fmt::Display for Joint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Joint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "base" | "0" => Ok(Joint::Base),
            "lower" | "1" => Ok(Joint::Lower),
            "upper" | "2" => Ok(Joint::Upper),
            "wrist" | "3" => Ok(Joint::Wrist),
            other => Err(format!("unknown joint '{}'", other)),
        }
    }
}

/// 关节数组
///
/// 类型安全的 4 关节数组容器，支持索引、迭代和映射操作。
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct JointArray<T> {
    data: [T; 4],
}

// 如果 T 实现了 Copy，则 JointArray<T> 也实现 Copy
impl<T: Copy> Copy for JointArray<T> {}

/// 关节角向量 `{base, lower, upper, wrist}`（度）
pub type JointVector = JointArray<Deg>;

impl<T> JointArray<T> {
    /// 创建新的关节数组
    #[inline]
    pub const fn new(data: [T; 4]) -> Self {
        JointArray { data }
    }

    /// 获取内部数组的引用
    #[inline]
    pub fn as_array(&self) -> &[T; 4] {
        &self.data
    }

    /// 获取内部数组（消耗 self）
    #[inline]
    pub fn into_array(self) -> [T; 4] {
        self.data
    }

    /// 迭代器
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// 可变迭代器
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    /// 映射转换
    pub fn map<U, F>(self, mut f: F) -> JointArray<U>
    where
        F: FnMut(T) -> U,
    {
        let [a, b, c, d] = self.data;
        JointArray::new([f(a), f(b), f(c), f(d)])
    }

    /// 带关节的映射转换
    pub fn map_with_joint<U, F>(self, mut f: F) -> JointArray<U>
    where
        F: FnMut(Joint, T) -> U,
    {
        let [a, b, c, d] = self.data;
        JointArray::new([
            f(Joint::Base, a),
            f(Joint::Lower, b),
            f(Joint::Upper, c),
            f(Joint::Wrist, d),
        ])
    }
}

impl<T: Copy> JointArray<T> {
    /// 创建所有元素相同的数组
    #[inline]
    pub const fn splat(value: T) -> Self {
        JointArray::new([value, value, value, value])
    }
}

impl<T: Default> Default for JointArray<T> {
    fn default() -> Self {
        JointArray::new([T::default(), T::default(), T::default(), T::default()])
    }
}

impl<T> From<[T; 4]> for JointArray<T> {
    #[inline]
    fn from(data: [T; 4]) -> Self {
        JointArray::new(data)
    }
}

impl JointArray<Deg> {
    /// 从裸角度值创建关节角向量
    #[inline]
    pub fn from_degrees(values: [f64; 4]) -> Self {
        JointArray::new(values).map(Deg)
    }
}

// 索引访问
impl<T> Index<Joint> for JointArray<T> {
    type Output = T;

    #[inline]
    fn index(&self, joint: Joint) -> &T {
        &self.data[joint.index()]
    }
}

impl<T> IndexMut<Joint> for JointArray<T> {
    #[inline]
    fn index_mut(&mut self, joint: Joint) -> &mut T {
        &mut self.data[joint.index()]
    }
}

impl<T: fmt::Display> fmt::Display for JointArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, (joint, value)) in Joint::ALL.iter().zip(self.data.iter()).enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", joint, value)?;
        }
        write!(f, "]")
    }
}
