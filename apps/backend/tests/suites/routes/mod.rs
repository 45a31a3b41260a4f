mod classroom_lifecycle;
