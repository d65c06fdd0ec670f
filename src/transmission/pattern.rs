//! Pattern labels (课体) and the cascade methods that produce them.

use serde::{Deserialize, Serialize};

/// A method in the resolution cascade, in dispatch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Method {
    /// 伏吟: heaven plate equals earth plate.
    StaticChant,
    /// 返吟: heaven plate opposes earth plate.
    ReverseChant,
    /// 贼克
    ThiefConqueror,
    /// 比用
    ComparisonUse,
    /// 涉害
    HarmInvolved,
    /// 遥克
    RemoteOvercome,
    /// 昂星
    AngStar,
    /// 别责
    SpecialResponsibility,
    /// 八专
    EightSpecial,
}

impl Method {
    pub fn hanzi(self) -> &'static str {
        match self {
            Method::StaticChant => "伏吟",
            Method::ReverseChant => "返吟",
            Method::ThiefConqueror => "贼克",
            Method::ComparisonUse => "比用",
            Method::HarmInvolved => "涉害",
            Method::RemoteOvercome => "遥克",
            Method::AngStar => "昂星",
            Method::SpecialResponsibility => "别责",
            Method::EightSpecial => "八专",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Method::StaticChant => "Static-Chant",
            Method::ReverseChant => "Reverse-Chant",
            Method::ThiefConqueror => "Thief-Conqueror",
            Method::ComparisonUse => "Comparison-Use",
            Method::HarmInvolved => "Harm-Involved",
            Method::RemoteOvercome => "Remote-Overcome",
            Method::AngStar => "Ang-Star",
            Method::SpecialResponsibility => "Special-Responsibility",
            Method::EightSpecial => "Eight-Special",
        };
        f.write_str(name)
    }
}

/// Which static-chant rule applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChantDay {
    /// 六癸日
    SixGui,
    /// 六乙日
    SixYi,
    /// 刚日: any other yang day.
    Firm,
    /// 柔日: any other yin day.
    Soft,
}

impl ChantDay {
    pub fn hanzi(self) -> &'static str {
        match self {
            ChantDay::SixGui => "六癸日",
            ChantDay::SixYi => "六乙日",
            ChantDay::Firm => "刚日",
            ChantDay::Soft => "柔日",
        }
    }
}

impl std::fmt::Display for ChantDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ChantDay::SixGui => "Six-Gui day",
            ChantDay::SixYi => "Six-Yi day",
            ChantDay::Firm => "firm day",
            ChantDay::Soft => "soft day",
        };
        f.write_str(name)
    }
}

/// The named pattern a chart resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pattern {
    /// 重审: a single thief lesson.
    DoubleReview,
    /// 元首: a single conqueror lesson.
    Chief,
    /// 知一: comparison narrowed the candidates to one.
    KnowOne,
    /// 涉害: one candidate had the deepest harm.
    PerceiveHarm,
    /// 见机: harm tied, decided on a meng branch.
    SeeOmen,
    /// 察微: harm tied, decided on a zhong branch.
    SubtleWatch,
    /// 复等: harm tied with no meng or zhong to decide it.
    DuplicateRank,
    /// 遥克
    RemoteOvercome,
    /// 虎视: ang-star on a yang day.
    TigerGaze,
    /// 冬蛇掩目: ang-star on a yin day.
    WinterSnake,
    /// 别责
    SpecialResponsibility,
    /// 八专
    EightSpecial,
    /// 无依: reverse chant with no thief or conqueror.
    Unanchored,
    /// 自任: static chant on a yang day.
    SelfReliant(ChantDay),
    /// 自信: static chant on a yin day.
    SelfTrust(ChantDay),
}

impl Pattern {
    pub fn hanzi(self) -> &'static str {
        match self {
            Pattern::DoubleReview => "重审",
            Pattern::Chief => "元首",
            Pattern::KnowOne => "知一",
            Pattern::PerceiveHarm => "涉害",
            Pattern::SeeOmen => "见机",
            Pattern::SubtleWatch => "察微",
            Pattern::DuplicateRank => "复等",
            Pattern::RemoteOvercome => "遥克",
            Pattern::TigerGaze => "虎视",
            Pattern::WinterSnake => "冬蛇掩目",
            Pattern::SpecialResponsibility => "别责",
            Pattern::EightSpecial => "八专",
            Pattern::Unanchored => "无依",
            Pattern::SelfReliant(_) => "自任",
            Pattern::SelfTrust(_) => "自信",
        }
    }

    /// The cascade method this pattern belongs to.
    pub fn family(self) -> Method {
        match self {
            Pattern::DoubleReview | Pattern::Chief => Method::ThiefConqueror,
            Pattern::KnowOne => Method::ComparisonUse,
            Pattern::PerceiveHarm
            | Pattern::SeeOmen
            | Pattern::SubtleWatch
            | Pattern::DuplicateRank => Method::HarmInvolved,
            Pattern::RemoteOvercome => Method::RemoteOvercome,
            Pattern::TigerGaze | Pattern::WinterSnake => Method::AngStar,
            Pattern::SpecialResponsibility => Method::SpecialResponsibility,
            Pattern::EightSpecial => Method::EightSpecial,
            Pattern::Unanchored => Method::ReverseChant,
            Pattern::SelfReliant(_) | Pattern::SelfTrust(_) => Method::StaticChant,
        }
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pattern::DoubleReview => f.write_str("Double-Review"),
            Pattern::Chief => f.write_str("Chief"),
            Pattern::KnowOne => f.write_str("Know-One"),
            Pattern::PerceiveHarm => f.write_str("Perceive-Harm"),
            Pattern::SeeOmen => f.write_str("See-Omen"),
            Pattern::SubtleWatch => f.write_str("Subtle-Watch"),
            Pattern::DuplicateRank => f.write_str("Duplicate-Rank"),
            Pattern::RemoteOvercome => f.write_str("Remote-Overcome"),
            Pattern::TigerGaze => f.write_str("Tiger-Gaze"),
            Pattern::WinterSnake => f.write_str("Winter-Snake"),
            Pattern::SpecialResponsibility => f.write_str("Special-Responsibility"),
            Pattern::EightSpecial => f.write_str("Eight-Special"),
            Pattern::Unanchored => f.write_str("Unanchored"),
            Pattern::SelfReliant(day) => write!(f, "Self-Reliant ({day})"),
            Pattern::SelfTrust(day) => write!(f, "Self-Trust ({day})"),
        }
    }
}
