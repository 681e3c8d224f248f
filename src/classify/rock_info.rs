use super::types::RockClass;

/// 岩石说明中的一个小节
#[derive(Debug, Clone, Copy)]
pub struct InfoSection {
    pub icon: Option<&'static str>,
    pub heading: &'static str,
    pub body: &'static str,
}

/// 每种岩石的静态说明文字
#[derive(Debug, Clone, Copy)]
pub struct RockInfo {
    pub class: RockClass,
    pub sections: &'static [InfoSection],
    /// 分条列出的用途；只有一句话的用途直接写成小节
    pub uses: &'static [&'static str],
    pub fun_fact: Option<&'static str>,
}

static COAL: RockInfo = RockInfo {
    class: RockClass::Coal,
    sections: &[
        InfoSection {
            icon: Some("🪵"),
            heading: "Composition",
            body: "Coal is an organic sedimentary rock composed primarily of carbon, hydrogen, \
                   oxygen, and small amounts of sulfur and nitrogen.",
        },
        InfoSection {
            icon: Some("🌿"),
            heading: "Formation",
            body: "Formed from the remains of ancient plants buried in swamps, subjected to heat \
                   and pressure over millions of years.",
        },
        InfoSection {
            icon: Some("⚒️"),
            heading: "Appearance",
            body: "Black to dark brown, brittle, lightweight, often with a dull to shiny luster.",
        },
    ],
    uses: &[
        "Major fuel source for electricity generation.",
        "Used in steel manufacturing (coke production).",
        "Source of industrial carbon and synthetic chemicals.",
    ],
    fun_fact: Some(
        "Coal is often called \"fossil sunlight\" because it stores ancient solar energy \
         trapped in plant matter.",
    ),
};

static LIMESTONE: RockInfo = RockInfo {
    class: RockClass::Limestone,
    sections: &[
        InfoSection {
            icon: Some("🧪"),
            heading: "Composition",
            body: "Mainly calcium carbonate (CaCO₃).",
        },
        InfoSection {
            icon: None,
            heading: "Formation",
            body: "Precipitated in marine waters or formed from shells and skeletal fragments.",
        },
        InfoSection {
            icon: None,
            heading: "Uses",
            body: "Cement, construction, glass, and agriculture.",
        },
    ],
    uses: &[],
    fun_fact: None,
};

static SANDSTONE: RockInfo = RockInfo {
    class: RockClass::Sandstone,
    sections: &[
        InfoSection {
            icon: None,
            heading: "Composition",
            body: "Sand-sized grains of quartz and feldspar.",
        },
        InfoSection {
            icon: None,
            heading: "Formation",
            body: "Deposited by wind or water in layers, compacted over time.",
        },
        InfoSection {
            icon: None,
            heading: "Uses",
            body: "Building stone, filters, and artwork material.",
        },
    ],
    uses: &[],
    fun_fact: None,
};

impl RockClass {
    /// 类别集合封闭，match穷尽保证每个类别都有说明
    pub fn info(self) -> &'static RockInfo {
        match self {
            RockClass::Coal => &COAL,
            RockClass::Limestone => &LIMESTONE,
            RockClass::Sandstone => &SANDSTONE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_class_has_info() {
        for class in RockClass::ALL {
            let info = class.info();
            assert_eq!(info.class, class);
            assert!(!info.sections.is_empty(), "{} has no sections", class);

            let has_uses = !info.uses.is_empty()
                || info.sections.iter().any(|s| s.heading == "Uses");
            assert!(has_uses, "{} has no uses", class);

            for section in info.sections {
                assert!(!section.heading.trim().is_empty());
                assert!(!section.body.trim().is_empty());
            }
        }
    }

    #[test]
    fn test_only_coal_has_fun_fact() {
        assert!(RockClass::Coal.info().fun_fact.is_some());
        assert!(RockClass::Limestone.info().fun_fact.is_none());
        assert!(RockClass::Sandstone.info().fun_fact.is_none());
    }

    #[test]
    fn test_only_coal_lists_uses_with_icons() {
        let coal = RockClass::Coal.info();
        assert_eq!(coal.uses.len(), 3);
        assert!(coal.sections.iter().all(|s| s.icon.is_some()));

        let limestone = RockClass::Limestone.info();
        assert!(limestone.uses.is_empty());
        assert_eq!(limestone.sections[0].icon, Some("🧪"));
        assert!(limestone.sections[1..].iter().all(|s| s.icon.is_none()));

        let sandstone = RockClass::Sandstone.info();
        assert!(sandstone.uses.is_empty());
        assert!(sandstone.sections.iter().all(|s| s.icon.is_none()));
    }

    #[test]
    fn test_limestone_mentions_calcium_carbonate() {
        let composition = RockClass::Limestone.info().sections[0];
        assert_eq!(composition.heading, "Composition");
        assert!(composition.body.contains("calcium carbonate"));
    }
}
