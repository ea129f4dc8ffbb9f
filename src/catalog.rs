// src/catalog.rs

use ratatui::style::Color;
use std::collections::HashMap;
use std::fmt;

/// A single concept within a study module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topic {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// Hint used to guide the prompt.
    pub prompt_context: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleType {
    Home,
    Python,
    Math,
    Ml,
    Dl,
    Rl,
    Practice,
}

impl ModuleType {
    /// Sidebar order. Digit shortcuts map onto this index.
    pub const ALL: [ModuleType; 7] = [
        ModuleType::Home,
        ModuleType::Python,
        ModuleType::Math,
        ModuleType::Ml,
        ModuleType::Dl,
        ModuleType::Rl,
        ModuleType::Practice,
    ];

    pub const STUDY: [ModuleType; 5] = [
        ModuleType::Python,
        ModuleType::Math,
        ModuleType::Ml,
        ModuleType::Dl,
        ModuleType::Rl,
    ];

    /// Modules promoted on the home screen.
    pub const HOME_CARDS: [ModuleType; 4] = [
        ModuleType::Python,
        ModuleType::Math,
        ModuleType::Ml,
        ModuleType::Dl,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleType::Home => "HOME",
            ModuleType::Python => "PYTHON",
            ModuleType::Math => "MATH",
            ModuleType::Ml => "ML",
            ModuleType::Dl => "DL",
            ModuleType::Rl => "RL",
            ModuleType::Practice => "PRACTICE",
        }
    }

    pub fn from_index(index: usize) -> Option<ModuleType> {
        Self::ALL.get(index).copied()
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|m| m == self).unwrap_or(0)
    }

    pub fn descriptor(&self) -> Option<&'static ModuleDescriptor> {
        MODULE_CONFIG.get(self)
    }

    pub fn topics(&self) -> &'static [Topic] {
        self.descriptor().map(|d| d.topics).unwrap_or(&[])
    }
}

impl fmt::Display for ModuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation data for a module.
#[derive(Debug)]
pub struct ModuleDescriptor {
    pub title: &'static str,
    pub icon: &'static str,
    pub color: Color,
    pub topics: &'static [Topic],
}

const PYTHON_TOPICS: &[Topic] = &[
    Topic { id: "p1", title: "基础语法与变量", description: "理解 Python 的动态类型与内存管理", prompt_context: "Python variables, types, memory model." },
    Topic { id: "p2", title: "高级数据结构", description: "列表推导式、生成器与装饰器", prompt_context: "List comprehensions, generators, decorators." },
    Topic { id: "p3", title: "面向对象编程", description: "类、继承与多态的实战", prompt_context: "OOP, classes, inheritance, polymorphism." },
];

const MATH_TOPICS: &[Topic] = &[
    Topic { id: "m1", title: "线性代数: 矩阵与变换", description: "向量空间、特征值与特征向量", prompt_context: "Linear algebra, matrices, eigenvalues, geometric interpretation." },
    Topic { id: "m2", title: "微积分: 梯度与优化", description: "导数、偏导数与梯度下降", prompt_context: "Calculus, derivatives, gradients, optimization." },
    Topic { id: "m3", title: "概率论与统计", description: "贝叶斯定理与分布", prompt_context: "Probability, Bayes theorem, distributions." },
];

const ML_TOPICS: &[Topic] = &[
    Topic { id: "ml1", title: "监督学习: 回归与分类", description: "线性回归、逻辑回归、SVM", prompt_context: "Supervised learning, regression, classification, SVM." },
    Topic { id: "ml2", title: "无监督学习: 聚类", description: "K-Means, PCA降维", prompt_context: "Unsupervised learning, K-means, PCA." },
    Topic { id: "ml3", title: "模型评估", description: "过拟合、欠拟合与交叉验证", prompt_context: "Model evaluation, overfitting, bias-variance tradeoff." },
];

const DL_TOPICS: &[Topic] = &[
    Topic { id: "dl1", title: "神经网络基础", description: "前向传播与反向传播", prompt_context: "Neural networks, backpropagation, activation functions." },
    Topic { id: "dl2", title: "卷积神经网络 (CNN)", description: "图像处理与特征提取", prompt_context: "CNN, convolution, pooling, image processing." },
    Topic { id: "dl3", title: "Transformer 架构", description: "Attention机制与大模型基础", prompt_context: "Transformers, self-attention, LLM basics." },
];

const RL_TOPICS: &[Topic] = &[
    Topic { id: "rl1", title: "马尔可夫决策过程 (MDP)", description: "状态、动作与奖励", prompt_context: "MDP, states, actions, rewards." },
    Topic { id: "rl2", title: "Q-Learning", description: "价值迭代与策略优化", prompt_context: "Q-learning, value iteration." },
    Topic { id: "rl3", title: "Deep Q-Network (DQN)", description: "深度强化学习实战", prompt_context: "DQN, experience replay." },
];

lazy_static::lazy_static! {
    /// Static module table. `Home` has no entry.
    pub static ref MODULE_CONFIG: HashMap<ModuleType, ModuleDescriptor> = {
        let mut map = HashMap::new();

        map.insert(ModuleType::Python, ModuleDescriptor {
            title: "Python 核心",
            icon: "🐍",
            color: Color::Yellow,
            topics: PYTHON_TOPICS,
        });
        map.insert(ModuleType::Math, ModuleDescriptor {
            title: "数学基础",
            icon: "∑",
            color: Color::Blue,
            topics: MATH_TOPICS,
        });
        map.insert(ModuleType::Ml, ModuleDescriptor {
            title: "机器学习",
            icon: "⚙",
            color: Color::Green,
            topics: ML_TOPICS,
        });
        map.insert(ModuleType::Dl, ModuleDescriptor {
            title: "深度学习",
            icon: "🧠",
            color: Color::Magenta,
            topics: DL_TOPICS,
        });
        map.insert(ModuleType::Rl, ModuleDescriptor {
            title: "强化学习",
            icon: "📈",
            color: Color::Red,
            topics: RL_TOPICS,
        });
        // Practice topics are handled by the code analyzer.
        map.insert(ModuleType::Practice, ModuleDescriptor {
            title: "代码实践",
            icon: "</>",
            color: Color::Gray,
            topics: &[],
        });

        map
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_study_module_has_three_topics() {
        for module in ModuleType::STUDY {
            assert_eq!(module.topics().len(), 3, "{} should have three topics", module);
        }
        assert!(ModuleType::Practice.topics().is_empty());
        assert!(ModuleType::Home.descriptor().is_none());
    }

    #[test]
    fn test_topic_ids_are_unique() {
        let mut seen = HashSet::new();
        for module in ModuleType::ALL {
            for topic in module.topics() {
                assert!(seen.insert(topic.id), "duplicate topic id {}", topic.id);
            }
        }
        assert_eq!(seen.len(), 15);
    }

    #[test]
    fn test_index_round_trip_follows_sidebar_order() {
        assert_eq!(ModuleType::from_index(0), Some(ModuleType::Home));
        assert_eq!(ModuleType::from_index(6), Some(ModuleType::Practice));
        assert_eq!(ModuleType::from_index(7), None);
        assert_eq!(ModuleType::Rl.index(), 5);
    }

    #[test]
    fn test_display_is_upper_case_identifier() {
        assert_eq!(ModuleType::Ml.to_string(), "ML");
        assert_eq!(format!("{}", ModuleType::Python), "PYTHON");
    }
}
