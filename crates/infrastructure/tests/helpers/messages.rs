use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_proto::rr::rdata::{A, SOA};
use hickory_proto::rr::{Name, RData, Record};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::net::Ipv4Addr;
use std::str::FromStr;

pub fn a_record(name: &str, ip: Ipv4Addr, ttl: u32) -> Record {
    Record::from_rdata(Name::from_str(name).unwrap(), ttl, RData::A(A(ip)))
}

pub fn soa_record(zone: &str, minimum: u32) -> Record {
    let name = Name::from_str(zone).unwrap();
    let mname = Name::from_str(&format!("ns1.{}", zone)).unwrap();
    let rname = Name::from_str(&format!("hostmaster.{}", zone)).unwrap();
    let soa = SOA::new(mname, rname, 1, 3600, 900, 604800, minimum);
    Record::from_rdata(name, minimum, RData::SOA(soa))
}

/// Builds a response echoing the query section of `query`.
pub fn response_for(query: &[u8], answers: Vec<Record>, authorities: Vec<Record>) -> Vec<u8> {
    let request = Message::from_vec(query).unwrap();
    response_with_id(&request, request.id(), answers, authorities)
}

pub fn response_with_id(
    request: &Message,
    id: u16,
    answers: Vec<Record>,
    authorities: Vec<Record>,
) -> Vec<u8> {
    let mut response = Message::new(id, MessageType::Response, OpCode::Query);
    response.set_recursion_desired(true);
    response.set_recursion_available(true);
    response.set_response_code(ResponseCode::NoError);
    for query in request.queries() {
        response.add_query(query.clone());
    }
    for record in answers {
        response.add_answer(record);
    }
    for record in authorities {
        response.add_name_server(record);
    }
    encode(&response)
}

pub fn encode(message: &Message) -> Vec<u8> {
    let mut buf = Vec::with_capacity(512);
    let mut encoder = BinEncoder::new(&mut buf);
    message.emit(&mut encoder).unwrap();
    buf
}

/// Name of the single question in a wire query.
pub fn query_name(query: &[u8]) -> String {
    let message = Message::from_vec(query).unwrap();
    message.queries()[0].name().to_string()
}
