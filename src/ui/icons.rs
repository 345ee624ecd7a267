/// Project glyphs. Backend rows carry kebab-case icon names; this maps them
/// onto a fixed set of terminal-renderable symbols. Resolution is total:
/// anything unknown lands on the folder glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectGlyph {
    Folder,
    Book,
    Briefcase,
    Calendar,
    Camera,
    ChartBar,
    Clock,
    Code,
    Coffee,
    Database,
    FileText,
    Flag,
    Globe,
    Hammer,
    Heart,
    Home,
    Lightbulb,
    Mail,
    Music,
    Palette,
    PenTool,
    Phone,
    Plane,
    PlaneTakeoff,
    Rocket,
    Settings,
    Star,
    Truck,
    Users,
    Wrench,
}

impl ProjectGlyph {
    pub const DEFAULT: ProjectGlyph = ProjectGlyph::Folder;

    /// Resolve a kebab-case icon name to a glyph. Never fails: absent or
    /// unknown names yield [`ProjectGlyph::DEFAULT`].
    pub fn resolve(icon: Option<&str>) -> Self {
        match icon {
            Some(name) => Self::from_key(&pascal_case(name)).unwrap_or(Self::DEFAULT),
            None => Self::DEFAULT,
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        let glyph = match key {
            "Folder" => ProjectGlyph::Folder,
            "Book" => ProjectGlyph::Book,
            "Briefcase" => ProjectGlyph::Briefcase,
            "Calendar" => ProjectGlyph::Calendar,
            "Camera" => ProjectGlyph::Camera,
            "ChartBar" => ProjectGlyph::ChartBar,
            "Clock" => ProjectGlyph::Clock,
            "Code" => ProjectGlyph::Code,
            "Coffee" => ProjectGlyph::Coffee,
            "Database" => ProjectGlyph::Database,
            "FileText" => ProjectGlyph::FileText,
            "Flag" => ProjectGlyph::Flag,
            "Globe" => ProjectGlyph::Globe,
            "Hammer" => ProjectGlyph::Hammer,
            "Heart" => ProjectGlyph::Heart,
            "Home" => ProjectGlyph::Home,
            "Lightbulb" => ProjectGlyph::Lightbulb,
            "Mail" => ProjectGlyph::Mail,
            "Music" => ProjectGlyph::Music,
            "Palette" => ProjectGlyph::Palette,
            "PenTool" => ProjectGlyph::PenTool,
            "Phone" => ProjectGlyph::Phone,
            "Plane" => ProjectGlyph::Plane,
            "PlaneTakeoff" => ProjectGlyph::PlaneTakeoff,
            "Rocket" => ProjectGlyph::Rocket,
            "Settings" => ProjectGlyph::Settings,
            "Star" => ProjectGlyph::Star,
            "Truck" => ProjectGlyph::Truck,
            "Users" => ProjectGlyph::Users,
            "Wrench" => ProjectGlyph::Wrench,
            _ => return None,
        };
        Some(glyph)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            ProjectGlyph::Folder => "📁",
            ProjectGlyph::Book => "📖",
            ProjectGlyph::Briefcase => "💼",
            ProjectGlyph::Calendar => "📅",
            ProjectGlyph::Camera => "📷",
            ProjectGlyph::ChartBar => "📊",
            ProjectGlyph::Clock => "🕒",
            ProjectGlyph::Code => "💻",
            ProjectGlyph::Coffee => "☕",
            ProjectGlyph::Database => "🗄",
            ProjectGlyph::FileText => "📄",
            ProjectGlyph::Flag => "⚑",
            ProjectGlyph::Globe => "🌐",
            ProjectGlyph::Hammer => "🔨",
            ProjectGlyph::Heart => "♥",
            ProjectGlyph::Home => "🏠",
            ProjectGlyph::Lightbulb => "💡",
            ProjectGlyph::Mail => "✉",
            ProjectGlyph::Music => "♪",
            ProjectGlyph::Palette => "🎨",
            ProjectGlyph::PenTool => "✒",
            ProjectGlyph::Phone => "☎",
            ProjectGlyph::Plane => "✈",
            ProjectGlyph::PlaneTakeoff => "🛫",
            ProjectGlyph::Rocket => "🚀",
            ProjectGlyph::Settings => "⚙",
            ProjectGlyph::Star => "★",
            ProjectGlyph::Truck => "🚚",
            ProjectGlyph::Users => "👥",
            ProjectGlyph::Wrench => "🔧",
        }
    }
}

/// `plane-takeoff` -> `PlaneTakeoff`: each hyphen-delimited word is
/// capitalized and concatenated.
fn pascal_case(name: &str) -> String {
    name.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}
