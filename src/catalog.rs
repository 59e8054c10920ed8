//! Static content catalog: gallery images and room types.
//!
//! The builtin catalog is compiled in and exposed as a process-wide
//! read-only singleton. Code that filters or renders content takes a
//! `&Catalog`, so tests can hand in their own.

use crate::i18n::LocalizedText;
use anyhow::{bail, Result};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Subject a content item is classified under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CategoryTag {
    Overview,
    NordicRoom,
    JapanRoom,
    AShapeRoom,
    River,
    Food,
}

impl CategoryTag {
    /// All tags, in gallery display order.
    pub const ALL: [CategoryTag; 6] = [
        CategoryTag::Overview,
        CategoryTag::NordicRoom,
        CategoryTag::JapanRoom,
        CategoryTag::AShapeRoom,
        CategoryTag::River,
        CategoryTag::Food,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryTag::Overview => "overview",
            CategoryTag::NordicRoom => "nordicRoom",
            CategoryTag::JapanRoom => "japanRoom",
            CategoryTag::AShapeRoom => "aShapeRoom",
            CategoryTag::River => "river",
            CategoryTag::Food => "food",
        }
    }
}

impl fmt::Display for CategoryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryTag {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match CategoryTag::ALL.iter().find(|tag| tag.as_str() == s) {
            Some(tag) => Ok(*tag),
            None => bail!("Unknown category tag: '{}'", s),
        }
    }
}

/// A gallery image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentItem {
    /// Stable identifier, unique within a catalog
    pub id: &'static str,

    /// Public image path
    pub src: &'static str,

    /// Caption / alt text
    pub text: LocalizedText,

    /// Never empty
    pub categories: &'static [CategoryTag],

    /// Loaded eagerly above the fold
    pub priority: bool,
}

impl ContentItem {
    pub fn has_category(&self, tag: CategoryTag) -> bool {
        self.categories.contains(&tag)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RoomKey {
    Nordic,
    Japanese,
    AShape,
}

/// A bookable room type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomType {
    pub key: RoomKey,
    pub name: LocalizedText,
    /// Maximum guests
    pub capacity: u8,
    /// Id of the cover image
    pub cover: &'static str,
    /// Ids of the room's gallery images, in display order
    pub gallery: &'static [&'static str],
}

/// Read-only collection of content items and room types.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<ContentItem>,
    rooms: Vec<RoomType>,
}

static BUILTIN: OnceLock<Catalog> = OnceLock::new();

impl Catalog {
    /// Build a catalog, checking its invariants.
    ///
    /// The catalog must not be empty, item ids must be unique, every item
    /// needs at least one category, and every image a room refers to must be
    /// in the catalog.
    pub fn new(items: Vec<ContentItem>, rooms: Vec<RoomType>) -> Result<Self> {
        if items.is_empty() {
            bail!("Catalog has no content items");
        }

        let mut ids = HashSet::new();
        for item in &items {
            if item.categories.is_empty() {
                bail!("Content item '{}' has no categories", item.id);
            }
            if !ids.insert(item.id) {
                bail!("Duplicate content item id: '{}'", item.id);
            }
        }

        for room in &rooms {
            for id in std::iter::once(&room.cover).chain(room.gallery) {
                if !ids.contains(id) {
                    bail!("Room {:?} refers to unknown image '{}'", room.key, id);
                }
            }
        }

        Ok(Self { items, rooms })
    }

    /// The compiled-in site catalog.
    pub fn builtin() -> &'static Catalog {
        BUILTIN.get_or_init(|| {
            Catalog::new(GALLERY_IMAGES.to_vec(), ROOM_TYPES.to_vec())
                .expect("builtin catalog is valid")
        })
    }

    /// All items in declaration order.
    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    pub fn rooms(&self) -> &[RoomType] {
        &self.rooms
    }

    pub fn get(&self, id: &str) -> Option<&ContentItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Resolve a room's gallery ids to items, skipping unknown ids.
    pub fn room_images(&self, room: &RoomType) -> Vec<&ContentItem> {
        room.gallery.iter().filter_map(|id| self.get(id)).collect()
    }
}

// ==================== Builtin Content ====================

const fn image(
    id: &'static str,
    src: &'static str,
    en: &'static str,
    th: &'static str,
    categories: &'static [CategoryTag],
    priority: bool,
) -> ContentItem {
    ContentItem {
        id,
        src,
        text: LocalizedText::new(en, th),
        categories,
        priority,
    }
}

use CategoryTag::*;

const GALLERY_IMAGES: &[ContentItem] = &[
    image("resort-panorama", "/images/background.jpg", "Resort panoramic view", "วิวพาโนรามารีสอร์ท", &[Overview], true),
    image("garden-evening", "/images/resort_garden_evening.jpg", "Resort garden at sunset", "สวนรีสอร์ทยามพระอาทิตย์ตก", &[Overview], true),
    image("garden-night", "/images/resort_garden_night.jpg", "Magical night atmosphere", "บรรยากาศยามค่ำสุดโรแมนติก", &[Overview], false),
    image("nordic-overview", "/images/room-type-nordic-overview.jpg", "Nordic-style room overview", "ห้องพักสไตล์นอร์ดิก ภาพรวม", &[NordicRoom], true),
    image("nordic-bedroom-1", "/images/room-type-nordic-bedroom-1.jpg", "Nordic room - bedroom view 1", "ห้องนอนสไตล์นอร์ดิก มุม 1", &[NordicRoom], false),
    image("nordic-bedroom-2", "/images/room-type-nordic-bedroom-2.jpg", "Nordic room - bedroom view 2", "ห้องนอนสไตล์นอร์ดิก มุม 2", &[NordicRoom], false),
    image("nordic-bathroom", "/images/room-type-nordic-bathroom.jpg", "Nordic room - modern bathroom", "ห้องน้ำสไตล์นอร์ดิก", &[NordicRoom], false),
    image("japan-bedroom-1", "/images/room-type-japan-bedroom-1.jpg", "Japanese room - bedroom view 1", "ห้องนอนสไตล์ญี่ปุ่น มุม 1", &[JapanRoom], true),
    image("japan-bedroom-2", "/images/room-type-japan-bedroom-2.jpg", "Japanese room - bedroom view 2", "ห้องนอนสไตล์ญี่ปุ่น มุม 2", &[JapanRoom], false),
    image("japan-bathroom", "/images/room-type-japan-bathroom.jpg", "Japanese room - bathroom", "ห้องน้ำสไตล์ญี่ปุ่น", &[JapanRoom], false),
    image("a-shape-overview", "/images/room-type-A-shape-overview.jpg", "A-Shape room - exterior view", "ห้องพักทรง A - ภายนอก", &[AShapeRoom], true),
    image("a-shape-full-room", "/images/room-type-A-shape-full-room.jpg", "A-Shape room - full interior", "ห้องพักทรง A - ภายในทั้งหมด", &[AShapeRoom], false),
    image("a-shape-bedroom-1f", "/images/room-type-A-shape-bedroom-1st-floor.jpg", "A-Shape room - 1st floor bedroom", "ห้องนอนชั้น 1 ห้องทรง A", &[AShapeRoom], false),
    image("a-shape-bedroom-2f", "/images/room-type-A-shape-bedroom-2nd-floor.jpg", "A-Shape room - 2nd floor loft", "ห้องนอนชั้นลอย ห้องทรง A", &[AShapeRoom], false),
    image("a-shape-bathroom", "/images/room-type-A-shape-bathroom.jpg", "A-Shape room - bathroom", "ห้องน้ำ ห้องทรง A", &[AShapeRoom], false),
    image("river-day", "/images/river-day.jpg", "River view during daytime", "วิวลำธารยามกลางวัน", &[River], true),
    image("river-night", "/images/river-night.jpg", "River view at night", "วิวลำธารยามค่ำคืน", &[River], false),
    image("breakfast", "/images/breakfast.jpg", "Complimentary breakfast", "อาหารเช้าฟรี", &[Food], true),
    image("mookata", "/images/mookata.jpg", "Thai BBQ (Mookata)", "หมูกระทะ", &[Food], false),
    image("grilled-fish", "/images/dinner-grill-fish.jpg", "Grilled fish dinner", "ปลาย่าง", &[Food], false),
    image("grilled-prawn", "/images/dinner-grill-prawn.jpg", "Grilled prawns", "กุ้งเผา", &[Food], false),
    image("grilled-squid", "/images/dinner-grill-squid.jpg", "Grilled squid", "ปลาหมึกย่าง", &[Food], false),
];

const ROOM_TYPES: &[RoomType] = &[
    RoomType {
        key: RoomKey::Nordic,
        name: LocalizedText::new("Nordic Room", "ห้องสไตล์นอร์ดิก"),
        capacity: 2,
        cover: "nordic-overview",
        gallery: &["nordic-overview", "nordic-bedroom-1", "nordic-bedroom-2", "nordic-bathroom"],
    },
    RoomType {
        key: RoomKey::Japanese,
        name: LocalizedText::new("Japanese Room", "ห้องสไตล์ญี่ปุ่น"),
        capacity: 2,
        cover: "japan-bedroom-1",
        gallery: &["japan-bedroom-1", "japan-bedroom-2", "japan-bathroom"],
    },
    RoomType {
        key: RoomKey::AShape,
        name: LocalizedText::new("A-Shape Room", "ห้องพักทรง A"),
        capacity: 4,
        cover: "a-shape-overview",
        gallery: &[
            "a-shape-overview",
            "a-shape-full-room",
            "a-shape-bedroom-1f",
            "a-shape-bedroom-2f",
            "a-shape-bathroom",
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn room(key: RoomKey) -> &'static RoomType {
        Catalog::builtin()
            .rooms()
            .iter()
            .find(|room| room.key == key)
            .unwrap()
    }

    #[test]
    fn test_builtin_satisfies_invariants() {
        let builtin = Catalog::builtin();
        let rebuilt = Catalog::new(builtin.items().to_vec(), builtin.rooms().to_vec());
        assert!(rebuilt.is_ok(), "{:?}", rebuilt.err());
    }

    #[test]
    fn test_builtin_returns_singleton() {
        assert!(std::ptr::eq(Catalog::builtin(), Catalog::builtin()));
    }

    #[test]
    fn test_builtin_counts() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.items().len(), 22);
        assert_eq!(catalog.rooms().len(), 3);
    }

    #[test]
    fn test_every_tag_is_used() {
        let catalog = Catalog::builtin();
        for tag in CategoryTag::ALL {
            assert!(
                catalog.items().iter().any(|item| item.has_category(tag)),
                "no items tagged {}",
                tag
            );
        }
    }

    #[test]
    fn test_every_item_has_both_languages() {
        for item in Catalog::builtin().items() {
            assert!(!item.text.en.is_empty(), "{} missing English text", item.id);
            assert!(!item.text.th.is_empty(), "{} missing Thai text", item.id);
        }
    }

    #[test]
    fn test_room_images_resolve_in_order() {
        let catalog = Catalog::builtin();
        let room = room(RoomKey::Japanese);
        let ids: Vec<_> = catalog.room_images(room).iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["japan-bedroom-1", "japan-bedroom-2", "japan-bathroom"]);
    }

    #[test]
    fn test_a_shape_sleeps_four() {
        assert_eq!(room(RoomKey::AShape).capacity, 4);
    }

    #[test]
    fn test_new_rejects_empty_categories() {
        let items = vec![image("x", "/x.jpg", "X", "X", &[], false)];
        let err = Catalog::new(items, vec![]).unwrap_err();
        assert!(err.to_string().contains("no categories"));
    }

    #[test]
    fn test_new_rejects_empty_catalog() {
        assert!(Catalog::new(vec![], vec![]).is_err());
    }

    #[test]
    fn test_new_rejects_duplicate_ids() {
        let items = vec![
            image("x", "/x.jpg", "X", "X", &[Food], false),
            image("x", "/y.jpg", "Y", "Y", &[River], false),
        ];
        let err = Catalog::new(items, vec![]).unwrap_err();
        assert!(err.to_string().contains("Duplicate"));
    }

    #[test]
    fn test_new_rejects_dangling_room_image() {
        let items = vec![image("x", "/x.jpg", "X", "X", &[NordicRoom], false)];
        let rooms = vec![RoomType {
            key: RoomKey::Nordic,
            name: LocalizedText::new("Nordic Room", "ห้องสไตล์นอร์ดิก"),
            capacity: 2,
            cover: "x",
            gallery: &["x", "missing"],
        }];
        let err = Catalog::new(items, rooms).unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_category_tag_parse() {
        assert_eq!("nordicRoom".parse::<CategoryTag>().unwrap(), NordicRoom);
        assert!("all".parse::<CategoryTag>().is_err());
        assert!("morning".parse::<CategoryTag>().is_err());
    }

    #[test]
    fn test_category_tag_serializes_camel_case() {
        assert_eq!(serde_json::to_string(&AShapeRoom).unwrap(), "\"aShapeRoom\"");
        for tag in CategoryTag::ALL {
            assert_eq!(serde_json::to_string(&tag).unwrap(), format!("\"{}\"", tag));
        }
    }
}
