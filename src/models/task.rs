use chrono::NaiveDate;

/// Project stage. The four known stages sort in project order by label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Phase {
    Design,
    Build,
    Implement,
    Finish,
    Unrecognized(String),
}

impl Phase {
    pub const KNOWN: [Phase; 4] = [Phase::Design, Phase::Build, Phase::Implement, Phase::Finish];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Design => "Phase1-Design",
            Self::Build => "Phase2-Build",
            Self::Implement => "Phase3-Implement",
            Self::Finish => "Phase4-Finish",
            Self::Unrecognized(s) => s,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "phase1-design" | "phase1-設計" | "design" => Some(Self::Design),
            "phase2-build" | "phase2-構築" | "build" => Some(Self::Build),
            "phase3-implement" | "phase3-実装" | "implement" => Some(Self::Implement),
            "phase4-finish" | "phase4-仕上げ" | "finish" => Some(Self::Finish),
            _ => None,
        }
    }

    pub fn parse(s: &str) -> Self {
        Self::from_str(s).unwrap_or_else(|| Self::Unrecognized(s.trim().to_string()))
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    OpeningPlan,
    Property,
    StoreWorks,
    MenuPlanning,
    Staffing,
    Promotion,
    Equipment,
    DataSystems,
    OpeningPrep,
    TastingReception,
    Unrecognized(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Self::OpeningPlan => "Opening Plan",
            Self::Property => "Property",
            Self::StoreWorks => "Store Works",
            Self::MenuPlanning => "Menu Planning",
            Self::Staffing => "Staffing",
            Self::Promotion => "Promotion",
            Self::Equipment => "Equipment",
            Self::DataSystems => "Data Systems",
            Self::OpeningPrep => "Opening Prep",
            Self::TastingReception => "Tasting Reception",
            Self::Unrecognized(s) => s,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "opening plan" | "開業計画" => Some(Self::OpeningPlan),
            "property" | "物件" => Some(Self::Property),
            "store works" | "店舗工事" => Some(Self::StoreWorks),
            "menu planning" | "メニュー計画" => Some(Self::MenuPlanning),
            "staffing" | "スタッフ採用・教育" => Some(Self::Staffing),
            "promotion" | "販促営業活動" => Some(Self::Promotion),
            "equipment" | "備品関連" => Some(Self::Equipment),
            "data systems" | "管理データシステム構築" => Some(Self::DataSystems),
            "opening prep" | "営業準備" => Some(Self::OpeningPrep),
            "tasting reception" | "試飲会レセプション" => Some(Self::TastingReception),
            _ => None,
        }
    }

    pub fn parse(s: &str) -> Self {
        Self::from_str(s).unwrap_or_else(|| Self::Unrecognized(s.trim().to_string()))
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Status {
    NotStarted,
    InProgress,
    Done,
    Unrecognized(String),
}

impl Status {
    pub fn as_str(&self) -> &str {
        match self {
            Self::NotStarted => "not-started",
            Self::InProgress => "in-progress",
            Self::Done => "done",
            Self::Unrecognized(s) => s,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            // A blank status cell means nobody has touched the task yet.
            "" | "not-started" | "not_started" | "未着手" => Some(Self::NotStarted),
            "in-progress" | "in_progress" | "進行中" => Some(Self::InProgress),
            "done" | "完了" => Some(Self::Done),
            _ => None,
        }
    }

    pub fn parse(s: &str) -> Self {
        Self::from_str(s).unwrap_or_else(|| Self::Unrecognized(s.trim().to_string()))
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

/// One normalized row of project work.
///
/// `start_day`/`end_day` always agree with the dates (see
/// [`crate::schedule::normalize::realign`]). Display sequence numbers are not
/// part of the record; they belong to a view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskRecord {
    pub phase: Phase,
    pub category: Category,
    pub title: String,
    pub detail: Option<String>,
    pub owner: String,
    pub status: Status,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_day: u32,
    pub end_day: u32,
    /// Store columns this crate does not interpret, in store order.
    pub extra: Vec<(String, String)>,
}

impl TaskRecord {
    pub fn is_single_day(&self) -> bool {
        self.start_day == self.end_day
    }

    pub fn span_days(&self) -> u32 {
        self.end_day - self.start_day + 1
    }
}
