mod classroom_service;
