// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::time::Duration;

/// 批次间停顿策略
///
/// 调度器在相邻批次之间向策略请求一次停顿时长，测试中可替换为确定性实现
pub trait DelayPolicy: Send + Sync {
    fn next_delay(&self) -> Duration;
}

/// 均匀随机停顿
#[derive(Debug, Clone, Copy)]
pub struct RandomDelay {
    /// 最小停顿
    pub min: Duration,
    /// 最大停顿
    pub max: Duration,
}

impl RandomDelay {
    /// 创建随机停顿策略，上下界颠倒时自动交换
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }
}

impl DelayPolicy for RandomDelay {
    fn next_delay(&self) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        let millis = rand::random_range(self.min.as_millis()..=self.max.as_millis());
        Duration::from_millis(millis as u64)
    }
}

/// 固定停顿
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedDelay(pub Duration);

impl DelayPolicy for FixedDelay {
    fn next_delay(&self) -> Duration {
        self.0
    }
}
