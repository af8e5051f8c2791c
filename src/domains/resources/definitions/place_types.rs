//! Place types reference resource definition.

use serde_json::{Map, Value};

use super::ResourceDefinition;
use crate::domains::resources::service::ResourceContent;

pub struct PlaceTypesResource;

impl ResourceDefinition for PlaceTypesResource {
    const URI: &'static str = "google-maps://docs/place-types";
    const NAME: &'static str = "Google Places API Types Reference";
    const DESCRIPTION: &'static str = "Place types accepted by the Places API type filters";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> ResourceContent {
        let types: Map<String, Value> = PLACE_TYPES
            .iter()
            .map(|(name, label)| ((*name).to_string(), Value::from(*label)))
            .collect();
        ResourceContent::Json(Value::Object(types))
    }
}

const PLACE_TYPES: &[(&str, &str)] = &[
    ("accounting", "Accounting services"),
    ("airport", "Airports"),
    ("amusement_park", "Amusement parks"),
    ("aquarium", "Aquariums"),
    ("art_gallery", "Art galleries"),
    ("atm", "ATMs"),
    ("bakery", "Bakeries"),
    ("bank", "Banks"),
    ("bar", "Bars and pubs"),
    ("beauty_salon", "Beauty salons"),
    ("bicycle_store", "Bicycle stores"),
    ("book_store", "Book stores"),
    ("bowling_alley", "Bowling alleys"),
    ("bus_station", "Bus stations"),
    ("cafe", "Cafes and coffee shops"),
    ("campground", "Campgrounds"),
    ("car_dealer", "Car dealerships"),
    ("car_rental", "Car rental agencies"),
    ("car_repair", "Car repair shops"),
    ("car_wash", "Car washes"),
    ("casino", "Casinos"),
    ("cemetery", "Cemeteries"),
    ("church", "Churches"),
    ("city_hall", "City halls"),
    ("clothing_store", "Clothing stores"),
    ("convenience_store", "Convenience stores"),
    ("courthouse", "Courthouses"),
    ("dentist", "Dentists"),
    ("department_store", "Department stores"),
    ("doctor", "Doctors and medical practices"),
    ("drugstore", "Drugstores and pharmacies"),
    ("electrician", "Electricians"),
    ("electronics_store", "Electronics stores"),
    ("embassy", "Embassies"),
    ("fire_station", "Fire stations"),
    ("florist", "Florists"),
    ("funeral_home", "Funeral homes"),
    ("furniture_store", "Furniture stores"),
    ("gas_station", "Gas stations"),
    ("gym", "Gyms and fitness centers"),
    ("hair_care", "Hair care services"),
    ("hardware_store", "Hardware stores"),
    ("hindu_temple", "Hindu temples"),
    ("home_goods_store", "Home goods stores"),
    ("hospital", "Hospitals"),
    ("insurance_agency", "Insurance agencies"),
    ("jewelry_store", "Jewelry stores"),
    ("laundry", "Laundromats"),
    ("lawyer", "Lawyers and law firms"),
    ("library", "Libraries"),
    ("light_rail_station", "Light rail stations"),
    ("liquor_store", "Liquor stores"),
    ("local_government_office", "Local government offices"),
    ("locksmith", "Locksmiths"),
    ("lodging", "Hotels and lodging"),
    ("meal_delivery", "Meal delivery services"),
    ("meal_takeaway", "Takeaway restaurants"),
    ("mosque", "Mosques"),
    ("movie_rental", "Movie rental stores"),
    ("movie_theater", "Movie theaters"),
    ("moving_company", "Moving companies"),
    ("museum", "Museums"),
    ("night_club", "Night clubs"),
    ("painter", "Painters"),
    ("park", "Parks"),
    ("parking", "Parking facilities"),
    ("pet_store", "Pet stores"),
    ("pharmacy", "Pharmacies"),
    ("physiotherapist", "Physiotherapists"),
    ("plumber", "Plumbers"),
    ("police", "Police stations"),
    ("post_office", "Post offices"),
    ("primary_school", "Primary schools"),
    ("real_estate_agency", "Real estate agencies"),
    ("restaurant", "Restaurants"),
    ("roofing_contractor", "Roofing contractors"),
    ("rv_park", "RV parks"),
    ("school", "Schools"),
    ("secondary_school", "Secondary schools"),
    ("shoe_store", "Shoe stores"),
    ("shopping_mall", "Shopping malls"),
    ("spa", "Spas"),
    ("stadium", "Stadiums"),
    ("storage", "Storage facilities"),
    ("store", "General stores"),
    ("subway_station", "Subway stations"),
    ("supermarket", "Supermarkets"),
    ("synagogue", "Synagogues"),
    ("taxi_stand", "Taxi stands"),
    ("tourist_attraction", "Tourist attractions"),
    ("train_station", "Train stations"),
    ("transit_station", "Transit stations"),
    ("travel_agency", "Travel agencies"),
    ("university", "Universities"),
    ("veterinary_care", "Veterinary care"),
    ("zoo", "Zoos"),
];
