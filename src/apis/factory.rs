use super::base::HttpFetcher;
use super::{
    fubon::FubonCrawler, huashan::HuashanCrawler, moca::MocaCrawler, npm::NpmCrawler,
    ntnu::NtnuCrawler, songshan::SongshanCrawler, tfam::TfamCrawler,
};
use crate::normalize::{
    DateNormalizer, FubonDates, HuashanDates, MocaDates, NpmDates, NtnuDates, SongshanDates,
    TfamDates,
};
use crate::types::{ExhibitionSource, Museum};
use chrono::NaiveDate;

/// Build the adapter for one museum. `reference` anchors year inference
/// for sites that omit the year.
pub fn create_source(
    museum: Museum,
    fetcher: HttpFetcher,
    reference: NaiveDate,
) -> Box<dyn ExhibitionSource> {
    match museum {
        Museum::Songshan => Box::new(SongshanCrawler::new(fetcher)),
        Museum::Npm => Box::new(NpmCrawler::new(fetcher)),
        Museum::Moca => Box::new(MocaCrawler::new(fetcher)),
        Museum::Huashan => Box::new(HuashanCrawler::new(fetcher, HuashanDates::new(reference))),
        Museum::Fubon => Box::new(FubonCrawler::new(fetcher)),
        Museum::Tfam => Box::new(TfamCrawler::new(fetcher)),
        Museum::Ntnu => Box::new(NtnuCrawler::new(fetcher)),
    }
}

/// The date normalizer a museum's adapter uses, on its own
pub fn create_date_normalizer(museum: Museum, reference: NaiveDate) -> Box<dyn DateNormalizer> {
    match museum {
        Museum::Songshan => Box::new(SongshanDates),
        Museum::Npm => Box::new(NpmDates),
        Museum::Moca => Box::new(MocaDates),
        Museum::Huashan => Box::new(HuashanDates::new(reference)),
        Museum::Fubon => Box::new(FubonDates),
        Museum::Tfam => Box::new(TfamDates),
        Museum::Ntnu => Box::new(NtnuDates),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HttpConfig;

    #[test]
    fn test_sources_report_their_museum() {
        let fetcher = HttpFetcher::new(&HttpConfig::default()).unwrap();
        let reference = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        for museum in Museum::ALL {
            assert_eq!(create_source(museum, fetcher.clone(), reference).museum(), museum);
        }
    }

    #[test]
    fn test_normalizers_match_museum_keys() {
        let reference = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        for museum in Museum::ALL {
            assert_eq!(create_date_normalizer(museum, reference).source_id(), museum.key());
        }
    }
}
