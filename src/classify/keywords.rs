//! Keyword vocabularies and color rules for classifying category names.
//!
//! These are curated domain vocabularies, not algorithms. Latin-script
//! entries are lowercase; names are case folded before matching. The order
//! of the color rules matters: the first rule whose keyword is contained in
//! the name wins.

/// Keywords that mark a category name as income.
///
/// Only consulted when no expense keyword matches, see
/// [classify](super::classify).
pub(super) const INCOME_KEYWORDS: &[&str] = &[
    // 薪資收入
    "薪資",
    "薪水",
    "月薪",
    "工資",
    "加班費",
    "獎金",
    "年終",
    "分紅",
    // 投資收益
    "投資",
    "股息",
    "配息",
    "股利",
    "利息",
    "租金收入",
    // 其他收入
    "獎學金",
    "退款",
    "退稅",
    "回饋",
    "中獎",
    "樂透",
    "資遣費",
    "理賠",
    "兼職",
    "外快",
    "收入",
    "salary",
    "wage",
    "payroll",
    "bonus",
    "commission",
    "overtime pay",
    "dividend",
    "interest",
    "investment",
    "rental income",
    "rent received",
    "scholarship",
    "refund",
    "rebate",
    "cashback",
    "lottery",
    "winnings",
    "severance",
    "insurance payout",
    "payout",
    "part-time",
    "side job",
    "income",
];

/// Keywords that mark a category name as an expense.
///
/// Checked before the income vocabulary, so a name containing keywords from
/// both sets always classifies as an expense.
pub(super) const EXPENSE_KEYWORDS: &[&str] = &[
    // 餐飲
    "餐飲",
    "早餐",
    "午餐",
    "晚餐",
    "宵夜",
    "飲料",
    "咖啡",
    "聚餐",
    "外送",
    "零食",
    // 交通
    "交通",
    "公車",
    "捷運",
    "計程車",
    "加油",
    "停車",
    "高鐵",
    "火車",
    // 購物
    "購物",
    "服飾",
    "衣服",
    "鞋子",
    "美妝",
    "日用品",
    "網購",
    "超市",
    // 娛樂
    "娛樂",
    "電影",
    "遊戲",
    "旅遊",
    "旅行",
    "唱歌",
    "運動",
    // 居住
    "房租",
    "住宿",
    "水電",
    "電費",
    "水費",
    "瓦斯",
    "網路費",
    "電話費",
    "管理費",
    // 醫療與教育
    "醫療",
    "掛號",
    "看診",
    "醫院",
    "牙醫",
    "教育",
    "學費",
    "補習",
    "書籍",
    "課程",
    "文具",
    // 固定支出
    "保險",
    "保費",
    "手續費",
    "訂閱",
    "會費",
    "稅金",
    "罰單",
    "food",
    "dining",
    "lunch",
    "dinner",
    "breakfast",
    "snack",
    "drink",
    "coffee",
    "grocery",
    "groceries",
    "restaurant",
    "transport",
    "bus",
    "taxi",
    "fuel",
    "parking",
    "train",
    "shopping",
    "clothes",
    "cosmetics",
    "entertainment",
    "movie",
    "game",
    "travel",
    "rent",
    "utilities",
    "electricity",
    "water bill",
    "gas",
    "internet",
    "phone",
    "medical",
    "doctor",
    "pharmacy",
    "hospital",
    "dentist",
    "education",
    "tuition",
    "course",
    "books",
    "stationery",
    "insurance",
    "premium",
    "fee",
    "subscription",
    "membership",
    "tax",
    "penalty",
];

/// Ordered color rules for income categories. The first matching keyword
/// decides the color.
pub(super) const INCOME_COLOR_RULES: &[(&str, &str)] = &[
    ("薪資", "#3b82f6"),
    ("薪水", "#3b82f6"),
    ("salary", "#3b82f6"),
    ("獎金", "#f59e0b"),
    ("bonus", "#f59e0b"),
    ("投資", "#8b5cf6"),
    ("investment", "#8b5cf6"),
    ("股息", "#8b5cf6"),
    ("利息", "#06b6d4"),
    ("interest", "#06b6d4"),
    ("租金", "#84cc16"),
    ("獎學金", "#22c55e"),
    ("scholarship", "#22c55e"),
    ("退款", "#14b8a6"),
    ("refund", "#14b8a6"),
    ("回饋", "#14b8a6"),
];

/// Ordered color rules for expense categories. The first matching keyword
/// decides the color.
pub(super) const EXPENSE_COLOR_RULES: &[(&str, &str)] = &[
    ("餐飲", "#f97316"),
    ("早餐", "#f97316"),
    ("午餐", "#f97316"),
    ("晚餐", "#f97316"),
    ("food", "#f97316"),
    ("lunch", "#f97316"),
    ("dinner", "#f97316"),
    ("交通", "#8b5cf6"),
    ("transport", "#8b5cf6"),
    ("購物", "#ec4899"),
    ("shopping", "#ec4899"),
    ("娛樂", "#a855f7"),
    ("entertainment", "#a855f7"),
    ("房租", "#64748b"),
    ("rent", "#64748b"),
    ("水電", "#0ea5e9"),
    ("醫療", "#dc2626"),
    ("medical", "#dc2626"),
    ("教育", "#6366f1"),
    ("education", "#6366f1"),
    ("保險", "#475569"),
    ("insurance", "#475569"),
    ("訂閱", "#d946ef"),
    ("subscription", "#d946ef"),
];

/// The color used for income categories whose name matches no color rule.
pub(super) const DEFAULT_INCOME_COLOR: &str = "#10b981";

/// The color used for expense categories whose name matches no color rule.
pub(super) const DEFAULT_EXPENSE_COLOR: &str = "#ef4444";
