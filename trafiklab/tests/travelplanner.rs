//! Travelplanner client against a mock server.

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use trafiklab::domain::LegType;
use trafiklab::travelplanner::{
    JourneyDetailRequest, TravelplannerClient, TravelplannerConfig, TravelplannerError,
    TripsRequest,
};

const TRIP_PATH: &str = "/v1/TravelplannerV3_1/trip.xml";

const TRIP_LIST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<TripList scrB="3|OB|MT" scrF="3|OF|MT">
  <Trip idx="0" tripId="C-0" ctxRecon="T$A=1@O=Slussen$" checksum="abc" valid="true" duration="PT21M">
    <LegList>
      <Leg idx="0" type="WALK" dist="20" name="Walk">
        <Origin name="Home" type="ADR" date="2024-03-15" time="10:00:00"/>
        <Destination name="Corner" type="ADR" date="2024-03-15" time="10:01:00"/>
      </Leg>
      <Leg idx="1" type="WALK" dist="30" name="Walk">
        <Origin name="Corner" type="ADR" date="2024-03-15" time="10:01:00"/>
        <Destination name="Slussen" type="ST" date="2024-03-15" time="10:03:00"/>
      </Leg>
      <Leg idx="2" type="JNY" name="Tunnelbana 13" category="MET" number="13">
        <Origin name="Slussen" date="2024-03-15" time="10:05:00"/>
        <Destination name="T-Centralen" date="2024-03-15" time="10:08:00"/>
        <JourneyDetailRef ref="1|33724|0|74|15032024"/>
      </Leg>
      <Leg idx="3" type="WALK" dist="10" name="Walk">
        <Origin name="T-Centralen" date="2024-03-15" time="10:08:00"/>
        <Destination name="Centralen" date="2024-03-15" time="10:10:00"/>
      </Leg>
      <Leg idx="4" type="JNY" name="Pendeltåg 41" category="TRN" number="41">
        <Origin name="Centralen" date="2024-03-15" time="10:12:00"/>
        <Destination name="Solna" date="2024-03-15" time="10:21:00"/>
      </Leg>
    </LegList>
  </Trip>
</TripList>"#;

fn client(server: &MockServer) -> TravelplannerClient {
    let config = TravelplannerConfig::new("test-key").with_base_url(server.uri());
    TravelplannerClient::new(config).unwrap()
}

#[tokio::test]
async fn trips_sends_key_and_hafas_ids() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(TRIP_PATH))
        .and(query_param("key", "test-key"))
        .and(query_param("originId", "300109192"))
        .and(query_param("destId", "300109001"))
        .and(query_param("lang", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_string(TRIP_LIST))
        .expect(1)
        .mount(&server)
        .await;

    let response = client(&server)
        .trips(&TripsRequest::between("9192", "9001"))
        .await
        .unwrap();

    assert_eq!(response.scr_f.as_deref(), Some("3|OF|MT"));
    assert_eq!(response.trips.len(), 1);

    let trip = &response.trips[0];
    assert_eq!(trip.legs.len(), 5);
    assert_eq!(trip.duration.map(|d| d.num_minutes()), Some(21));
    assert_eq!(trip.legs[2].leg_type, LegType::Journey);
    assert_eq!(
        trip.legs[2].journey_detail_ref.as_deref(),
        Some("1|33724|0|74|15032024")
    );
}

#[tokio::test]
async fn combine_walks_on_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(TRIP_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(TRIP_LIST))
        .mount(&server)
        .await;

    let response = client(&server)
        .trips(&TripsRequest::between("9192", "9001"))
        .await
        .unwrap()
        .combine_walks();

    let legs = &response.trips[0].legs;
    // 20 + 30 merged and kept, the 10 m connector dropped
    assert_eq!(legs.len(), 3);
    assert!(legs[0].is_walk());
    assert_eq!(legs[0].distance, 50);
    assert_eq!(legs[0].origin.name, "Home");
    assert_eq!(legs[0].destination.name, "Slussen");
    assert_eq!(legs[1].name, "Tunnelbana 13");
    assert_eq!(legs[2].name, "Pendeltåg 41");
    assert_eq!(
        legs.iter().map(|l| l.idx).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
}

#[tokio::test]
async fn service_error_in_payload() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(TRIP_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<TripList errorCode="SVC_LOC" errorText="location missing or invalid"/>"#,
        ))
        .mount(&server)
        .await;

    let err = client(&server)
        .trips(&TripsRequest::between("9192", "9001"))
        .await
        .unwrap_err();

    match err {
        TravelplannerError::Service { code, text } => {
            assert_eq!(code, "SVC_LOC");
            assert_eq!(text, "location missing or invalid");
        }
        other => panic!("expected service error, got {other:?}"),
    }
}

#[tokio::test]
async fn unauthorized_and_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(TRIP_PATH))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/TravelplannerV3_1/Reconstruction.xml"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = client(&server);
    assert!(matches!(
        client.trips(&TripsRequest::between("9192", "9001")).await,
        Err(TravelplannerError::Unauthorized)
    ));
    assert!(matches!(
        client.reconstruction("ctx").await,
        Err(TravelplannerError::RateLimited)
    ));
}

#[tokio::test]
async fn server_error_keeps_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(TRIP_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = client(&server)
        .trips(&TripsRequest::between("9192", "9001"))
        .await
        .unwrap_err();

    match err {
        TravelplannerError::ApiError { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "maintenance");
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_xml_reports_excerpt() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(TRIP_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<TripList><Trip"))
        .mount(&server)
        .await;

    let err = client(&server)
        .trips(&TripsRequest::between("9192", "9001"))
        .await
        .unwrap_err();

    match err {
        TravelplannerError::Xml { body, .. } => {
            assert_eq!(body.as_deref(), Some("<TripList><Trip"));
        }
        other => panic!("expected XML error, got {other:?}"),
    }
}

#[tokio::test]
async fn bad_site_id_fails_before_sending() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(TRIP_LIST))
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server)
        .trips(&TripsRequest::between("Slussen", "9001"))
        .await
        .unwrap_err();
    assert!(matches!(err, TravelplannerError::InvalidRequest(_)));
}

#[tokio::test]
async fn reconstruction_sends_context() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/TravelplannerV3_1/Reconstruction.xml"))
        .and(query_param("ctx", "T$A=1@O=Slussen$"))
        .respond_with(ResponseTemplate::new(200).set_body_string(TRIP_LIST))
        .expect(1)
        .mount(&server)
        .await;

    let response = client(&server)
        .reconstruction("T$A=1@O=Slussen$")
        .await
        .unwrap();
    assert_eq!(response.trips[0].ctx_recon, "T$A=1@O=Slussen$");
}

#[tokio::test]
async fn journey_detail_builds_leg() {
    let server = MockServer::start().await;

    let xml = r#"<JourneyDetail>
  <Stops>
    <Stop name="Slussen" routeIdx="12" depDate="2024-03-15" depTime="10:05:00"/>
    <Stop name="Gamla stan" routeIdx="13" arrDate="2024-03-15" arrTime="10:06:00" depDate="2024-03-15" depTime="10:06:30"/>
    <Stop name="T-Centralen" routeIdx="14" arrDate="2024-03-15" arrTime="10:08:00"/>
  </Stops>
  <Product name="Tunnelbana 13" num="13" line="13" catCode="2"/>
</JourneyDetail>"#;

    Mock::given(method("GET"))
        .and(path("/v1/TravelplannerV3_1/journeydetail.xml"))
        .and(query_param("id", "1|33724|0|74|15032024"))
        .and(query_param("poly", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(xml))
        .expect(1)
        .mount(&server)
        .await;

    let request = JourneyDetailRequest::new("1|33724|0|74|15032024").with_poly();
    let leg = client(&server).journey_detail(&request).await.unwrap();

    assert_eq!(leg.stops.len(), 3);
    assert_eq!(leg.origin.name, "Slussen");
    assert_eq!(leg.origin.time.as_deref(), Some("10:05:00"));
    assert_eq!(leg.destination.name, "T-Centralen");
    assert_eq!(leg.destination.time.as_deref(), Some("10:08:00"));
    assert_eq!(leg.line(), "13");
}
