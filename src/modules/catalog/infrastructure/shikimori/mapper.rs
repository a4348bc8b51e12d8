use super::models::{AnimeFull, AnimeShort, RelatedDto};
use crate::modules::catalog::domain::{AnimeDetails, AnimeSummary, Genre, RelatedAnime};
use chrono::NaiveDate;

/// Converts Shikimori payloads into catalog entities
#[derive(Debug, Clone)]
pub struct ShikimoriMapper {
    base_url: String,
}

impl ShikimoriMapper {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Image paths come back relative to the site root; placeholder
    /// "missing" images are dropped
    fn absolute_url(&self, path: Option<&str>) -> Option<String> {
        let path = path?.trim();
        if path.is_empty() || path.contains("missing_") {
            return None;
        }
        if path.starts_with("http://") || path.starts_with("https://") {
            Some(path.to_string())
        } else {
            Some(format!("{}/{}", self.base_url, path.trim_start_matches('/')))
        }
    }

    fn parse_score(score: Option<&str>) -> Option<f64> {
        score
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|s| *s > 0.0)
    }

    fn parse_date(date: Option<&str>) -> Option<NaiveDate> {
        date.and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
    }

    fn non_empty(values: Vec<Option<String>>) -> Vec<String> {
        values
            .into_iter()
            .flatten()
            .filter(|v| !v.trim().is_empty())
            .collect()
    }

    pub fn map_summary(&self, dto: AnimeShort) -> AnimeSummary {
        let image = dto.image.as_ref();
        AnimeSummary {
            id: dto.id,
            name: dto.name,
            russian: dto.russian.filter(|r| !r.trim().is_empty()),
            image_url: self.absolute_url(image.and_then(|i| i.original.as_deref())),
            preview_url: self.absolute_url(image.and_then(|i| i.preview.as_deref())),
            // unknown values from newer API versions are tolerated
            kind: dto.kind.as_deref().and_then(|k| k.parse().ok()),
            status: dto.status.as_deref().and_then(|s| s.parse().ok()),
            score: Self::parse_score(dto.score.as_deref()),
            episodes: dto.episodes,
            episodes_aired: dto.episodes_aired,
            aired_on: Self::parse_date(dto.aired_on.as_deref()),
            released_on: Self::parse_date(dto.released_on.as_deref()),
        }
    }

    pub fn map_details(&self, dto: AnimeFull) -> AnimeDetails {
        AnimeDetails {
            summary: self.map_summary(dto.short),
            english: Self::non_empty(dto.english),
            japanese: Self::non_empty(dto.japanese),
            synonyms: Self::non_empty(dto.synonyms),
            description: dto.description.filter(|d| !d.trim().is_empty()),
            age_rating: dto.rating.filter(|r| r != "none"),
            duration_minutes: dto.duration.filter(|d| *d > 0),
            genres: dto
                .genres
                .into_iter()
                .map(|g| Genre {
                    id: g.id,
                    name: g.name,
                    russian: g.russian,
                })
                .collect(),
            studios: dto
                .studios
                .into_iter()
                .map(|s| s.filtered_name.unwrap_or(s.name))
                .collect(),
            franchise: dto.franchise,
        }
    }

    pub fn map_related(&self, items: Vec<RelatedDto>) -> Vec<RelatedAnime> {
        items
            .into_iter()
            .filter_map(|item| {
                let anime = item.anime?;
                Some(RelatedAnime {
                    relation: item.relation,
                    relation_russian: item.relation_russian,
                    anime: self.map_summary(anime),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::catalog::domain::{AnimeKind, AnimeStatus};

    fn mapper() -> ShikimoriMapper {
        ShikimoriMapper::new("https://shikimori.one/")
    }

    fn short_json() -> &'static str {
        r#"{
            "id": 5114,
            "name": "Fullmetal Alchemist: Brotherhood",
            "russian": "Стальной алхимик: Братство",
            "image": {
                "original": "/system/animes/original/5114.jpg?1674378220",
                "preview": "/system/animes/preview/5114.jpg?1674378220",
                "x96": "/system/animes/x96/5114.jpg",
                "x48": "/system/animes/x48/5114.jpg"
            },
            "url": "/animes/5114",
            "kind": "tv",
            "score": "9.1",
            "status": "released",
            "episodes": 64,
            "episodes_aired": 0,
            "aired_on": "2009-04-05",
            "released_on": "2010-07-04"
        }"#
    }

    #[test]
    fn maps_list_entry() {
        let dto: AnimeShort = serde_json::from_str(short_json()).unwrap();
        let anime = mapper().map_summary(dto);

        assert_eq!(anime.id, 5114);
        assert_eq!(anime.display_title(), "Стальной алхимик: Братство");
        assert_eq!(
            anime.image_url.as_deref(),
            Some("https://shikimori.one/system/animes/original/5114.jpg?1674378220")
        );
        assert_eq!(anime.kind, Some(AnimeKind::Tv));
        assert_eq!(anime.status, Some(AnimeStatus::Released));
        assert_eq!(anime.score, Some(9.1));
        assert_eq!(anime.aired_on, NaiveDate::from_ymd_opt(2009, 4, 5));
    }

    #[test]
    fn unscored_and_missing_images_become_none() {
        let dto: AnimeShort = serde_json::from_str(
            r#"{"id":1,"name":"X","score":"0.0","kind":"something_new",
                "image":{"original":"/assets/globals/missing_original.jpg","preview":null,"x96":null,"x48":null}}"#,
        )
        .unwrap();
        let anime = mapper().map_summary(dto);
        assert_eq!(anime.score, None);
        assert_eq!(anime.image_url, None);
        assert_eq!(anime.kind, None);
        assert_eq!(anime.display_title(), "X");
    }

    #[test]
    fn related_skips_manga() {
        let items: Vec<RelatedDto> = serde_json::from_str(&format!(
            r#"[
                {{"relation":"Adaptation","relation_russian":"Адаптация","anime":null,"manga":{{"id":25}}}},
                {{"relation":"Sequel","relation_russian":"Продолжение","anime":{},"manga":null}}
            ]"#,
            short_json()
        ))
        .unwrap();

        let related = mapper().map_related(items);
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].relation, "Sequel");
        assert_eq!(related[0].anime.id, 5114);
    }

    #[test]
    fn details_drop_blank_alt_titles() {
        let dto: AnimeFull = serde_json::from_str(
            r#"{"id":2,"name":"Y","english":["Y EN", null],"japanese":[""],"synonyms":[],
                "rating":"pg_13","duration":24,"description":"  ",
                "genres":[{"id":1,"name":"Action","russian":"Экшен","kind":"genre"}],
                "studios":[{"id":4,"name":"Bones Inc","filtered_name":"Bones"}]}"#,
        )
        .unwrap();
        let details = mapper().map_details(dto);
        assert_eq!(details.english, vec!["Y EN".to_string()]);
        assert!(details.japanese.is_empty());
        assert_eq!(details.description, None);
        assert_eq!(details.studios, vec!["Bones".to_string()]);
        assert_eq!(details.duration_minutes, Some(24));
    }
}
